use crate::shared::structs::discord::interaction::{Interaction, InteractionData};

/// Builds the hyphen-joined name of the command variant that was invoked,
/// e.g. `settings-user-add` for `/settings user add`.
///
/// Starting at `node` (the interaction's root data when `None`), the first
/// child that is a sub-command or sub-command group and is not the option
/// currently being autocompleted is followed. The walk stops at the first
/// level without such a child.
pub fn resolve_command_name(interaction: &Interaction, node: Option<&InteractionData>) -> String {
    let node = node.unwrap_or(&interaction.data);

    match node
        .options
        .iter()
        .find(|option| !option.is_focused() && option.is_sub_command())
    {
        Some(child) => format!(
            "{}-{}",
            &node.name,
            resolve_command_name(interaction, Some(child))
        ),
        None => node.name.clone(),
    }
}

pub fn topic_name(prefix: &str, command_name: &str) -> String {
    format!("{prefix}-{command_name}")
}
