use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

pub mod prompts;


use crate::ai::{AIError, TextGenerator};
use crate::analysis::{LanguageStat, ProjectAnalysis, ProjectStructure};

/// The one sanctioned serialization of a [`ProjectStructure`]: sets become
/// sorted vectors, the field set is fixed here rather than inferred, and
/// `version` marks the payload shape for downstream consumers.
#[derive(Debug, Serialize)]
pub struct StructurePayload {
    pub version: u32,
    pub total_files: usize,
    pub entry_points: Vec<String>,
    pub file_groups: BTreeMap<String, Vec<String>>,
    pub dependencies: BTreeMap<String, Vec<String>>,
    pub files: Vec<FilePayload>,
}

#[derive(Debug, Serialize)]
pub struct FilePayload {
    pub path: String,
    pub extension: String,
    pub size: u64,
    pub referenced_by: Vec<String>,
}

impl StructurePayload {
    pub fn from_structure(structure: &ProjectStructure) -> Self {
        Self {
            version: 1,
            total_files: structure.files.len(),
            entry_points: structure.entry_points.iter().cloned().collect(),
            file_groups: structure.file_groups.clone(),
            dependencies: structure
                .dependencies
                .iter()
                .map(|(path, targets)| (path.clone(), targets.iter().cloned().collect()))
                .collect(),
            files: structure
                .files
                .values()
                .map(|record| FilePayload {
                    path: record.path.clone(),
                    extension: record.extension.clone(),
                    size: record.size,
                    referenced_by: record.referenced_by.iter().cloned().collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub total_files: usize,
    pub entry_points: Vec<String>,
    pub file_categories: BTreeMap<String, usize>,
    pub languages: Vec<LanguageStat>,
}

impl Statistics {
    fn from_analysis(payload: &StructurePayload, analysis: &ProjectAnalysis) -> Self {
        Self {
            total_files: payload.total_files,
            entry_points: payload.entry_points.clone(),
            file_categories: payload
                .file_groups
                .iter()
                .filter(|(_, files)| !files.is_empty())
                .map(|(group, files)| (group.clone(), files.len()))
                .collect(),
            languages: analysis.languages.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectOverview {
    pub overview: String,
    pub statistics: Statistics,
}

/// The assembled documentation for one analyzed project.
#[derive(Debug, Serialize)]
pub struct Documentation {
    pub project_overview: ProjectOverview,
    pub component_analysis: String,
    pub project_analysis: String,
    pub generated_at: DateTime<Utc>,
}

/// Serializes the project model and drives the generator through the three
/// fixed prompts. Generator failures propagate unchanged; this function adds
/// no retry of its own beyond what the client already does.
pub async fn generate_documentation(
    generator: &dyn TextGenerator,
    analysis: &ProjectAnalysis,
    custom_instructions: &str,
) -> Result<Documentation, AIError> {
    let payload = StructurePayload::from_structure(&analysis.structure);
    let statistics = Statistics::from_analysis(&payload, analysis);

    info!("generating project overview");
    let overview = generator
        .generate(&prompts::overview(
            &payload,
            &analysis.languages,
            custom_instructions,
        ))
        .await?;

    info!("generating component analysis");
    let component_analysis = generator
        .generate(&prompts::components(
            &payload,
            &analysis.declared_dependencies,
        ))
        .await?;

    info!("generating project analysis");
    let project_analysis = generator.generate(&prompts::project(&payload)).await?;

    Ok(Documentation {
        project_overview: ProjectOverview {
            overview,
            statistics,
        },
        component_analysis,
        project_analysis,
        generated_at: Utc::now(),
    })
}
