mod generate;
mod plan;

pub use generate::cmd_generate;
pub use plan::cmd_plan;
