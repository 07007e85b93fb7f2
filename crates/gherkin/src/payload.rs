// ABOUTME: Request bodies for filing BDD test cases in a test-management service.
// ABOUTME: Builds the test-case creation payload and the BDD test-script payload as serde types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::GherkinError;
use crate::steps::StepSequence;

/// Timestamp suffix appended to generated test-case names.
pub const NAME_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// The kind of test case being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TestCaseType {
    #[default]
    #[serde(rename = "BDD")]
    Bdd,
}

/// The script format attached to a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    #[default]
    Bdd,
}

/// Body of a "create test case" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseRequest {
    pub name: String,
    pub project_key: String,
    pub test_case_type: TestCaseType,
    pub objective: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
}

impl TestCaseRequest {
    /// Build a request named `"<title> - <YYYYmmddHHMMSS>"`.
    pub fn new(
        title: &str,
        project_key: &str,
        created_at: NaiveDateTime,
    ) -> Result<Self, GherkinError> {
        let title = title.trim();
        let project_key = project_key.trim();
        if title.is_empty() {
            return Err(GherkinError::EmptyField("title"));
        }
        if project_key.is_empty() {
            return Err(GherkinError::EmptyField("project key"));
        }
        Ok(Self {
            name: format!("{} - {}", title, created_at.format(NAME_TIMESTAMP_FORMAT)),
            project_key: project_key.to_string(),
            test_case_type: TestCaseType::Bdd,
            objective: String::new(),
            folder_id: None,
        })
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = objective.into();
        self
    }

    /// Place the test case in a folder; `None` keeps it at the root level.
    pub fn with_folder(mut self, folder_id: Option<u64>) -> Self {
        self.folder_id = folder_id;
        self
    }
}

/// Body of an "add test script" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestScriptRequest {
    #[serde(rename = "type")]
    pub script_type: ScriptType,
    pub text: String,
}

impl TestScriptRequest {
    /// Build a BDD script from extracted steps. An empty sequence is the
    /// "nothing to emit" condition and yields [`GherkinError::NoSteps`].
    pub fn from_steps(steps: &StepSequence) -> Result<Self, GherkinError> {
        if steps.is_empty() {
            return Err(GherkinError::NoSteps);
        }
        Ok(Self {
            script_type: ScriptType::Bdd,
            text: steps.to_script(),
        })
    }
}

/// Both request bodies for one generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub test_case: TestCaseRequest,
    pub test_script: Option<TestScriptRequest>,
}

impl Submission {
    /// Pair a test case with the script built from `steps`. When there are
    /// no steps the script is omitted, matching a create-without-script flow.
    pub fn new(test_case: TestCaseRequest, steps: &StepSequence) -> Self {
        let test_script = match TestScriptRequest::from_steps(steps) {
            Ok(script) => Some(script),
            Err(err) => {
                tracing::warn!(error = %err, name = %test_case.name, "skipping test script");
                None
            }
        };
        Self {
            test_case,
            test_script,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, GherkinError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
