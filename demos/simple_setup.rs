//! Example: Client setup and CPU control
//!
//! Run with: cargo run --example simple_setup
//!
//! This example demonstrates:
//! - Client configuration with custom settings
//! - Rack/slot addressing and raw TSAPs
//! - CPU run/stop control
//! - Error handling patterns

use siemens_s7::{Client, ClientConfig, ConnectionType, S7Error};
use std::net::Ipv4Addr;
use std::time::Duration;

fn main() -> siemens_s7::Result<()> {
    // =========================================================================
    // Basic Configuration
    // =========================================================================
    //
    // ClientConfig::new(ip, rack, slot) creates a basic configuration:
    // - ip: PLC IP address
    // - rack: rack number of the CPU
    // - slot: slot number of the CPU

    let basic_config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    println!("Basic config created: {:?}", basic_config);

    // =========================================================================
    // Advanced Configuration
    // =========================================================================
    //
    // For gateways, slow links or OP/basic connection resources:

    let advanced_config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2)
        // Custom port (default is 102)
        .with_port(10102)
        // Shorter timeout for fast local networks (default is 5 seconds)
        .with_timeout(Duration::from_secs(2))
        // Register as an operator panel instead of a programming device
        .with_connection_type(ConnectionType::OP)
        // Propose a larger PDU; the CPU may still grant less
        .with_pdu_size_requested(960);

    println!("Advanced config created: {:?}", advanced_config);

    // =========================================================================
    // Rack/Slot Addressing Explained
    // =========================================================================
    //
    // The remote TSAP is derived from connection type, rack and slot:
    //
    //     remote TSAP = (type << 8) | (rack * 0x20 + slot)
    //
    // | CPU family        | Rack | Slot  |
    // |-------------------|------|-------|
    // | S7-300            | 0    | 2     |
    // | S7-400            | 0-n  | 2-n   |
    // | WinAC / CPs       | use raw TSAPs |
    //
    // Targets configured with fixed TSAPs bypass the derivation:

    let tsap_config =
        ClientConfig::new(Ipv4Addr::new(192, 168, 0, 20), 0, 0).with_tsap(0x1000, 0x2700);
    println!(
        "TSAP config: local 0x{:04X}, remote 0x{:04X}",
        tsap_config.local_tsap,
        tsap_config.remote_tsap()
    );

    // =========================================================================
    // Connecting
    // =========================================================================
    //
    // Note: actual communication requires a real PLC on the network. The
    // control operations below are commented out because they change the
    // CPU run state.

    println!("\nAttempting to connect...");

    match Client::connect_to(basic_config) {
        Ok(mut client) => {
            println!("Connected!");
            println!("  PDU length: {}", client.pdu_length());

            let status = client.get_plc_status()?;
            println!("  CPU state:  {}", status);

            // =================================================================
            // CPU Control Operations (uncomment when connected to a test PLC)
            // =================================================================

            // Stop the CPU
            // WARNING: This halts program execution!
            // client.plc_stop()?;
            // println!("CPU stopped");

            // Start the CPU without a memory reset
            // client.plc_hot_start()?;
            // println!("CPU running (hot start)");

            // Start the CPU with a memory reset
            // client.plc_cold_start()?;
            // println!("CPU running (cold start)");

            client.disconnect();
        }
        Err(S7Error::TcpConnectionFailed { source }) => {
            println!("Connection error (expected if no PLC): {}", source);
            println!("\nTo test this example, ensure:");
            println!("  1. PLC is powered on and connected to the network");
            println!("  2. PLC IP address matches the configuration");
            println!("  3. ISO-on-TCP port (102) is not blocked");
        }
        Err(e) => {
            println!("Unexpected error: {}", e);
        }
    }

    // =========================================================================
    // Error Handling Patterns
    // =========================================================================

    println!("\n--- Error Handling Examples ---");

    // Pattern 1: Simple propagation with ?
    fn example_simple(client: &mut Client) -> siemens_s7::Result<()> {
        client.plc_stop()?;
        client.plc_hot_start()?;
        Ok(())
    }

    // Pattern 2: Match specific errors
    fn example_match_errors(client: &mut Client) {
        match client.plc_stop() {
            Ok(()) => println!("Stop accepted"),
            Err(S7Error::TcpDataRecvTimeout) => println!("Timeout - check the network"),
            Err(S7Error::S7FunctionError { code }) => {
                println!("CPU refused the order: 0x{:04X}", code);
                // Protection level or mode selector may forbid it
            }
            Err(e) => println!("Other error: {}", e),
        }
    }

    // Pattern 3: Retry logic
    fn example_retry(client: &mut Client, max_retries: u32) -> siemens_s7::Result<()> {
        for attempt in 1..=max_retries {
            match client.plc_stop() {
                Ok(()) => return Ok(()),
                Err(S7Error::TcpDataRecvTimeout) if attempt < max_retries => {
                    println!("Attempt {} timed out, retrying...", attempt);
                    std::thread::sleep(Duration::from_millis(100));
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
        unreachable!()
    }

    // Suppress unused function warnings for examples
    let _ = example_simple;
    let _ = example_match_errors;
    let _ = example_retry;

    println!("\nSetup example completed!");
    println!("See simple_read.rs and simple_write.rs for data operations.");

    Ok(())
}
