use std::collections::HashMap;

use serenity::all::{CommandInteraction, ResolvedOption, ResolvedValue};

use crate::error::command::CommandError;
use crate::model::member::MemberProfile;

/// A single resolved option value, detached from the interaction's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    String(String),
    User(MemberProfile),
}

/// Owned, name-indexed view of a slash command's options.
///
/// Option types the bot never registers are ignored.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    values: HashMap<String, OptionValue>,
}

impl CommandOptions {
    pub fn from_interaction(command: &CommandInteraction) -> Self {
        Self::from_resolved(&command.data.options())
    }

    pub fn from_resolved(options: &[ResolvedOption<'_>]) -> Self {
        let values = options
            .iter()
            .filter_map(|option| {
                let value = match &option.value {
                    ResolvedValue::Boolean(value) => OptionValue::Boolean(*value),
                    ResolvedValue::Integer(value) => OptionValue::Integer(*value),
                    ResolvedValue::String(value) => OptionValue::String(value.to_string()),
                    ResolvedValue::User(user, member) => {
                        OptionValue::User(MemberProfile::from_user(user, *member))
                    }
                    _ => return None,
                };
                Some((option.name.to_string(), value))
            })
            .collect();

        Self { values }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(OptionValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(OptionValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// String option with surrounding whitespace removed; blank values count as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::String(value)) => {
                Some(value.trim()).filter(|value| !value.is_empty())
            }
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<&MemberProfile> {
        match self.values.get(name) {
            Some(OptionValue::User(profile)) => Some(profile),
            _ => None,
        }
    }

    /// Required, non-blank string option.
    ///
    /// # Returns
    /// - `Ok(String)` - Trimmed value
    /// - `Err(CommandError::InvalidArgument)` - Option missing or blank
    pub fn required_text(&self, name: &str) -> Result<String, CommandError> {
        self.text(name)
            .map(str::to_string)
            .ok_or_else(|| CommandError::InvalidArgument(format!("`{}` must not be empty.", name)))
    }

    #[cfg(test)]
    pub fn with(mut self, name: &str, value: OptionValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }
}
