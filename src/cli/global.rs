use clap::Args;

/// Global arguments that apply to every mode
#[derive(Args)]
pub struct GlobalArgs {
    /// Suppress warnings
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
