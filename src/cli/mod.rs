pub mod app;
pub mod commands;
pub mod compile;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod execute;
pub mod generate;
pub mod info;
pub mod output;
pub mod runtime;
pub mod serve;
