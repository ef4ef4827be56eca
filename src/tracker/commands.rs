use std::{collections::HashMap, sync::Arc};

use anyhow::Result;

pub const SHOW_SUMMARY_COMMAND: &str = "devmirror.showSummary";
pub const HELLO_WORLD_COMMAND: &str = "devmirror.helloWorld";
pub const HELLO_WORLD_MESSAGE: &str = "Hello World from DevMirror!";

/// A command body. It receives the handler it was registered against; the host invocation
/// itself carries no arguments.
pub type Command<H> = Box<dyn FnMut(&mut H) -> Result<()> + Send>;

/// Registration half of the command surface, kept narrow so wiring code and tests only depend
/// on the ability to register.
pub trait CommandRegistrar<H> {
    fn register(&mut self, name: &str, command: Command<H>);
}

/// Maps host command ids to their bodies. Dispatch happens by name when the host feed reports
/// an invocation.
pub struct CommandRegistry<H> {
    commands: HashMap<Arc<str>, Command<H>>,
}

impl<H> CommandRegistry<H> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Runs the named command against `handler`. Returns whether the name was known; an unknown
    /// command is the host's mistake, not a failure of ours.
    pub fn invoke(&mut self, name: &str, handler: &mut H) -> Result<bool> {
        match self.commands.get_mut(name) {
            Some(command) => command(handler).map(|()| true),
            None => Ok(false),
        }
    }
}

impl<H> Default for CommandRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> CommandRegistrar<H> for CommandRegistry<H> {
    fn register(&mut self, name: &str, command: Command<H>) {
        self.commands.insert(name.into(), command);
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{CommandRegistrar, CommandRegistry};

    #[test]
    fn test_registered_command_runs_against_handler() -> Result<()> {
        let mut registry = CommandRegistry::<u32>::new();
        registry.register("test.increment", Box::new(|count| {
            *count += 1;
            Ok(())
        }));

        let mut count = 0;
        assert!(registry.invoke("test.increment", &mut count)?);
        assert!(registry.invoke("test.increment", &mut count)?);
        assert_eq!(count, 2);
        Ok(())
    }

    #[test]
    fn test_unknown_command_reports_not_found() -> Result<()> {
        let mut registry = CommandRegistry::<u32>::new();
        let mut count = 0;
        assert!(!registry.invoke("test.missing", &mut count)?);
        assert_eq!(count, 0);
        Ok(())
    }
}
