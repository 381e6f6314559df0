use std::collections::HashMap;
use std::io::Write;

use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::object::ObjectHolder;

/// Variable scope: one per method call, one for the whole top-level program.
pub type Closure = HashMap<String, ObjectHolder>;

/// Per-run state shared by every executing node.
///
/// The output sink is fixed when the context is built and never replaced
/// while the program runs.
pub struct Context<'a> {
    output: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        Self { output }
    }

    pub(crate) fn write_line(&mut self, line: &str) -> RuntimeResult<()> {
        writeln!(self.output, "{line}").map_err(|err| RuntimeError::Output {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_newline_terminated_lines() {
        let mut output = Vec::new();
        let mut context = Context::new(&mut output);
        context.write_line("hello 57").expect("write");
        context.write_line("").expect("write");
        assert_eq!(String::from_utf8(output).expect("utf8"), "hello 57\n\n");
    }
}
