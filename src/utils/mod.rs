pub mod environment;
pub mod text;

pub use environment::claude_projects_dir;
pub use text::truncate_chars;
