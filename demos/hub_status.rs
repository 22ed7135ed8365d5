//! Print the current configuration of a Videohub.
//!
//! Usage: `cargo run --example hub_status -- <host> [port]`

use videohub_preset::{HubClient, DEFAULT_PORT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "192.168.1.248".to_string());
    let port = match args.next() {
        Some(p) => p.parse()?,
        None => DEFAULT_PORT,
    };

    let client = HubClient::new(host, port);
    let (state, preamble) = client.read_state().await?;

    println!("--- Preamble ---");
    for line in preamble.lines().filter(|l| !l.is_empty()) {
        println!("{}", line);
    }

    println!("\n--- Inputs ---");
    for (index, label) in &state.input_labels {
        println!("{:>4}  {}", index + 1, label);
    }

    println!("\n--- Outputs ---");
    for (index, label) in &state.output_labels {
        println!("{:>4}  {}", index + 1, label);
    }

    println!("\n--- Routing ---");
    for (output, input) in &state.routing {
        println!(
            "{:>4}  {:<24} <- {:>4}  {}",
            output + 1,
            state.output_label(*output),
            input + 1,
            state.input_label(*input)
        );
    }

    Ok(())
}
