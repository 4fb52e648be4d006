use super::StructurePayload;
use crate::analysis::{DeclaredDependency, LanguageStat};

/// Project-overview prompt: statistics plus high-level guidance. The caller's
/// free-text instructions ride along verbatim.
pub fn overview(
    payload: &StructurePayload,
    languages: &[LanguageStat],
    custom_instructions: &str,
) -> String {
    let categories: Vec<String> = payload
        .file_groups
        .iter()
        .filter(|(_, files)| !files.is_empty())
        .map(|(group, files)| format!("{}: {}", group, files.len()))
        .collect();

    let language_summary: Vec<String> = languages
        .iter()
        .map(|lang| format!("- {} ({:.1}%, {} lines)", lang.name, lang.percentage, lang.code_lines))
        .collect();

    format!(
        "Analyze this project structure and provide a comprehensive technical documentation overview:\n\
         \n\
         Project Statistics:\n\
         - Total Files: {}\n\
         - Entry Points: {}\n\
         - File Categories: {}\n\
         \n\
         Languages:\n\
         {}\n\
         \n\
         Custom Instructions: {}\n\
         \n\
         Provide a clear and easy-to-understand guide that even non-experts can comprehend:\n\
         1. Project type and main purpose: explain how the product works in simple terms.\n\
         2. Architecture overview: simplify the complicated ideas into a clear structure.\n\
         3. Key components and their relationships: document internal processes and how they interact.\n\
         4. Technologies used: list and briefly explain the main technologies for non-technical stakeholders.\n\
         5. Project organization analysis: capture valuable information about the project structure.\n\
         6. User guide: briefly explain how to use or interact with the main features of the project.\n\
         7. Troubleshooting: include common issues and their solutions for developers and users.\n\
         8. Generate a Mermaid diagram showing the high-level architecture and component relationships.\n\
         \n\
         Make all information easy to find and reference, using clear headings and bullet points.",
        payload.total_files,
        serde_json::to_string(&payload.entry_points).unwrap_or_default(),
        categories.join(", "),
        language_summary.join("\n"),
        custom_instructions,
    )
}

/// Per-component analysis prompt: entry points, groups, and the dependency
/// graph, plus whatever the manifests declare.
pub fn components(payload: &StructurePayload, declared: &[DeclaredDependency]) -> String {
    let declared_summary: Vec<String> = declared
        .iter()
        .map(|dep| {
            format!(
                "- {} {} ({}{})",
                dep.name,
                dep.version,
                dep.source,
                if dep.is_dev { ", dev" } else { "" }
            )
        })
        .collect();

    format!(
        "Analyze each major component of the project and create technical documentation that simplifies complicated ideas:\n\
         \n\
         Entry Points: {}\n\
         File Categories: {}\n\
         Dependencies: {}\n\
         \n\
         Declared Third-Party Dependencies:\n\
         {}\n\
         \n\
         For each major component, provide a clear and concise guide:\n\
         1. Purpose and functionality: explain in simple terms what the component does and why it matters.\n\
         2. Integration with other components: describe how it fits into the overall system.\n\
         3. Usage instructions: step-by-step guidelines on how to use or interact with the component.\n\
         4. Common pitfalls and solutions: potential issues users might encounter and how to resolve them.\n\
         5. Best practices: tips for optimal use of the component.\n\
         \n\
         Ensure the documentation is accessible to both technical and non-technical stakeholders.",
        serde_json::to_string(&payload.entry_points).unwrap_or_default(),
        serde_json::to_string(&payload.file_groups).unwrap_or_default(),
        serde_json::to_string(&payload.dependencies).unwrap_or_default(),
        declared_summary.join("\n"),
    )
}

/// Features, limitations, and future-scope prompt.
pub fn project(payload: &StructurePayload) -> String {
    format!(
        "Based on the project structure, provide a comprehensive technical document covering:\n\
         \n\
         Entry Points: {}\n\
         File Categories: {}\n\
         Dependencies: {}\n\
         \n\
         1. Key Features: list the main features and explain how each benefits the end user.\n\
         2. Limitations and Constraints: identify current limitations in plain language, with workarounds where applicable.\n\
         3. Future Scope: suggest potential areas for expansion or new features.\n\
         4. Improvement Areas: recommend specific improvements for code quality, architecture, or performance.\n\
         5. Maintenance Guide: simple instructions for keeping the project up to date, with a checklist of regular tasks.\n\
         6. FAQs: anticipate and answer common questions users or stakeholders might have.\n\
         \n\
         Use clear, concise language and avoid jargon. The goal is documentation that empowers all \
         stakeholders with easily accessible and understandable information.",
        serde_json::to_string(&payload.entry_points).unwrap_or_default(),
        serde_json::to_string(&payload.file_groups).unwrap_or_default(),
        serde_json::to_string(&payload.dependencies).unwrap_or_default(),
    )
}
