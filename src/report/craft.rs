/// Context, Request, Actions, Frame, Template: a structured remediation
/// prompt an agent can act on directly.
pub struct CraftPrompt<'a> {
    pub context: &'a str,
    pub request: &'a str,
    pub actions: &'a [String],
    pub frame: &'a str,
    pub template: &'a str,
}

/// Renders the prompt as a Markdown block quote.
pub fn craft_prompt(prompt: &CraftPrompt) -> String {
    let actions = prompt
        .actions
        .iter()
        .map(|action| format!("> - {action}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "> **Context**: {}\n> **Request**: {}\n> **Actions**:\n{}\n> **Frame**: {}\n> **Template**: {}",
        prompt.context, prompt.request, actions, prompt.frame, prompt.template
    )
}
