//! Starter content for documentation files `fix` can create.

pub const AGENT_CONTEXT_TEMPLATE: &str = "# Agent Context: {project_name}

## Project Goal
[Brief description of what this project does]

## Architecture
- **Entry Point:** [Main file]
- **Key Modules:**
    - `module_a`: Handles X
    - `module_b`: Handles Y

## Developer Constraints
- Use Python 3.10+
- All functions must have docstrings
- Type hints are strict
";

pub const INSTRUCTIONS_TEMPLATE: &str = "# Instructions

1. **Install Dependencies:** `pip install -r requirements.txt`
2. **Run Tests:** `pytest`
3. **Lint:** `pylint src/`
";

pub const README_TEMPLATE: &str = "# Project\n\nAuto-generated README.\n";

/// Template body for a required file, or `None` when no template exists.
pub fn template_for(file_name: &str, project_name: &str) -> Option<String> {
    match file_name.to_ascii_lowercase().as_str() {
        "agents.md" => Some(AGENT_CONTEXT_TEMPLATE.replace("{project_name}", project_name)),
        "instructions.md" => Some(INSTRUCTIONS_TEMPLATE.to_string()),
        "readme.md" => Some(README_TEMPLATE.to_string()),
        _ => None,
    }
}
