use crate::error::ShellError;
use crate::input;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<(), ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> Result<(), ShellError> {
        // $$ expansion happens before tokenization
        let expanded = input::expand_pid(line);
        let tokens = input::tokenize(&expanded);

        if input::is_comment_or_blank(&tokens) {
            return Ok(());
        }

        self.executor
            .execute(&tokens, &mut self.state)
            .map_err(ShellError::CommandError)
    }
}
