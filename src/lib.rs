//! Small standalone utilities: a streaming line counter, blocking HTTP helpers,
//! interactive prompts and a few environment lookups.

pub mod failure;
pub mod grid;
pub mod home;
pub mod http;
pub mod line_count;
pub mod mime;
pub mod network;
pub mod prompt;

pub use failure::{render, return_on_error};
pub use grid::loop_2d;
pub use home::home_dir;
pub use http::{download_image, send_request, Download};
pub use line_count::{count_lines, LineCount, LineCountError, BUFFER_SIZE};
pub use network::local_ip;
pub use prompt::{PromptError, Prompter};
