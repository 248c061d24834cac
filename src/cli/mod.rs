use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (login, prompt, history)
    Serve {
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Send a single prompt and record it in the user's history
    Prompt {
        text: String,

        #[arg(short, long)]
        username: String,
    },

    /// Show the recorded history of a user
    History {
        #[arg(short, long)]
        username: String,
    },
}
