//! In-band control commands typed into the user's own messages.

mod interpreter;
mod parser;

pub use interpreter::CommandInterpreter;
pub use parser::{
    COMMAND_PREFIX, Command, REPLY_COMMAND_PREFIX, RETRANSLATE_MARKER, is_command,
    parse_reply_command, strip_retranslate_marker,
};
