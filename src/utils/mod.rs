pub mod environment;
pub mod paths;
pub mod text;

pub use environment::get_projects_dir;
pub use paths::{format_path_with_tilde, last_path_segment, open_log_file};
pub use text::truncate_with_ellipsis;
