//! Query Value Types
//!
//! A [`Query`] pairs a [`CommandId`] with its argument list. The analyzer is
//! the only place that hands out queries to callers, and it only does so once
//! the argument count matches the command's arity.
//!
//! Command dispatch is a plain sum type: each variant knows its own name and
//! arity, so there is no side table indexed by an integer identifier that
//! could drift out of sync with the enum.

use std::fmt;

/// Identifies which command a query runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// `SET <key> <value>`
    Set,
    /// `GET <key>`
    Get,
    /// `DEL <key>`
    Del,
    /// Anything that is not one of the commands above
    Unknown,
}

impl CommandId {
    /// Every command that can be executed, in table order.
    pub const KNOWN: [CommandId; 3] = [CommandId::Set, CommandId::Get, CommandId::Del];

    /// Resolves a command name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Self {
        match name {
            "SET" => CommandId::Set,
            "GET" => CommandId::Get,
            "DEL" => CommandId::Del,
            _ => CommandId::Unknown,
        }
    }

    /// The literal name of the command as it appears on the wire.
    pub fn name(self) -> &'static str {
        match self {
            CommandId::Set => "SET",
            CommandId::Get => "GET",
            CommandId::Del => "DEL",
            CommandId::Unknown => "UNKNOWN",
        }
    }

    /// Exact number of arguments the command takes, `None` for `Unknown`.
    pub fn arity(self) -> Option<usize> {
        match self {
            CommandId::Set => Some(2),
            CommandId::Get | CommandId::Del => Some(1),
            CommandId::Unknown => None,
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A command together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    command_id: CommandId,
    arguments: Vec<String>,
}

impl Query {
    pub fn new(command_id: CommandId, arguments: Vec<String>) -> Self {
        Self {
            command_id,
            arguments,
        }
    }

    pub fn command_id(&self) -> CommandId {
        self.command_id
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Consumes the query, returning its arguments.
    pub fn into_arguments(self) -> Vec<String> {
        self.arguments
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_id.name())?;
        for arg in &self.arguments {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
