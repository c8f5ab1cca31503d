pub mod settings {
    use serde::{Deserialize, Serialize};

    fn default_backend_url() -> String {
        "http://127.0.0.1:8000".to_string()
    }

    fn default_model() -> String {
        // Matches the backend's default when no model name is sent.
        "custom-deepseek-coder".to_string()
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AppSettings {
        /// Base address of the analysis/testing backend.
        #[serde(default = "default_backend_url")]
        pub backend_url: String,
        /// Ollama model name sent with action requests when the user
        /// hasn't picked one in the chat page.
        #[serde(default = "default_model")]
        pub default_model: String,
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                backend_url: default_backend_url(),
                default_model: default_model(),
            }
        }
    }
}

pub mod api {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    /// One entry in a backend-supplied directory tree.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum NodeKind {
        File,
        Folder,
    }

    /// A file or folder returned by `/api/v1/list-directory`.
    ///
    /// `path` is unique across the tree; `children` is only populated for
    /// folders. The whole tree is replaced on every new listing.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DirectoryNode {
        pub name: String,
        pub path: String,
        #[serde(rename = "type")]
        pub kind: NodeKind,
        #[serde(default)]
        pub children: Vec<DirectoryNode>,
    }

    impl DirectoryNode {
        pub fn is_folder(&self) -> bool {
            self.kind == NodeKind::Folder
        }
    }

    /// Entry in the Ollama model list. The backend proxies Ollama's tag
    /// list; `name` is the only field we consume.
    #[derive(Debug, Clone, Deserialize)]
    pub struct ModelInfo {
        pub name: String,
    }

    /// Common request body for the three action endpoints.
    #[derive(Debug, Clone, Serialize)]
    pub struct ActionRequest {
        pub base_path: String,
        pub selected_items: Vec<String>,
        pub ollama_model_name: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AnalysisReport {
        pub title: String,
        pub overall_score: i64,
        #[serde(default)]
        pub categories: Vec<AnalysisCategory>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AnalysisCategory {
        pub name: String,
        #[serde(default)]
        pub score: Option<i64>,
        pub grade: String,
        pub summary: String,
        #[serde(default)]
        pub explanation: Option<String>,
        #[serde(default)]
        pub recommendations: Option<String>,
        /// Keyed metric/value object or a raw issue list, depending on the
        /// category. Rendered generically, never interpreted.
        #[serde(default)]
        pub details: Value,
    }

    /// Consolidated report from `/api/v1/run-testing-pipeline`.
    ///
    /// The backend fills the sections progressively and leaves defaults
    /// like `{"success": false, "message": "..."}` for steps that did not
    /// run, so every field here tolerates absence.
    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct TestingReport {
        #[serde(default)]
        pub summary: TestingSummary,
        #[serde(default)]
        pub pynguin_test_generation: Value,
        #[serde(default)]
        pub gemini_test_generation: GeminiTestGeneration,
        #[serde(default)]
        pub coverage_analysis: CoverageAnalysis,
        #[serde(default)]
        pub mutation_testing: MutationTesting,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct TestingSummary {
        #[serde(default)]
        pub overall_status: String,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub coverage: Option<String>,
        #[serde(default)]
        pub mutation_score: Option<String>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct GeminiTestGeneration {
        #[serde(default)]
        pub success: bool,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub test_suites_generated: Option<i64>,
        #[serde(default)]
        pub generated_tests: Vec<GeneratedTest>,
        #[serde(default)]
        pub errors: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GeneratedTest {
        pub filename: String,
        pub code: String,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct CoverageAnalysis {
        #[serde(default)]
        pub success: bool,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub summary: Option<CoverageSummary>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct CoverageSummary {
        #[serde(default)]
        pub percent_covered: f64,
        #[serde(default)]
        pub percent_covered_display: String,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct MutationTesting {
        #[serde(default)]
        pub success: bool,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub score: Option<String>,
        #[serde(default)]
        pub raw_report: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct FinetuneResponse {
        pub message: String,
        #[serde(default)]
        pub files_for_training: Option<i64>,
    }
}
