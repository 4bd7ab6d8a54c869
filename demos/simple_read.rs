//! Example: Reading data from PLC memory
//!
//! Run with: cargo run --example simple_read
//!
//! This example demonstrates:
//! - Reading bytes from different memory areas
//! - Reading timers and counters
//! - Interpreting raw bytes with the codec helpers
//! - Large reads split transparently to the PDU size

use siemens_s7::codec::{get_bit_at, get_dword_at, get_real_at, get_string_at, get_word_at};
use siemens_s7::{Area, Client, ClientConfig};
use std::net::Ipv4Addr;

fn main() -> siemens_s7::Result<()> {
    // =========================================================================
    // Connect to PLC
    // =========================================================================

    let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    let mut client = Client::connect_to(config)?;
    println!("Connected, PDU length = {}", client.pdu_length());

    // =========================================================================
    // Reading Data Blocks
    // =========================================================================

    println!("\n=== Reading Data Blocks ===\n");

    // Read DB1.DBB0..DBB15
    let db1 = client.read_db(1, 0, 16)?;
    println!("DB1.DBB0-15: {:02X?}", db1);

    // The same through the generic area call
    let db1 = client.read_area(Area::DB, 1, 0, 16)?;
    println!("DB1 again:   {:02X?}", db1);

    // =========================================================================
    // Reading Process Images and Merkers
    // =========================================================================

    println!("\n=== Reading Process Images ===\n");

    let inputs = client.read_inputs(0, 4)?;
    let outputs = client.read_outputs(0, 4)?;
    let merkers = client.read_merkers(0, 4)?;

    println!("IB0-3: {:02X?}", inputs);
    println!("QB0-3: {:02X?}", outputs);
    println!("MB0-3: {:02X?}", merkers);

    // =========================================================================
    // Reading Timers and Counters
    // =========================================================================

    println!("\n=== Reading Timers and Counters ===\n");

    // Each timer and counter is one 2 byte element
    let timers = client.read_timers(0, 4)?;
    let counters = client.read_counters(0, 4)?;

    for i in 0..4 {
        println!("T{} = 0x{:04X}", i, get_word_at(&timers, i * 2));
    }
    for i in 0..4 {
        println!("C{} = 0x{:04X}", i, get_word_at(&counters, i * 2));
    }

    // =========================================================================
    // Interpreting Raw Bytes
    // =========================================================================

    println!("\n=== Interpreting Raw Bytes ===\n");

    // S7 data is big-endian; the codec helpers decode in place
    let data = client.read_db(1, 0, 32)?;

    // DB1.DBW0 as INT
    let raw = get_word_at(&data, 0);
    println!("DB1.DBW0 = {} (signed {})", raw, raw as i16);

    // DB1.DBD2 as DINT
    let dword = get_dword_at(&data, 2);
    println!("DB1.DBD2 = {} (signed {})", dword, dword as i32);

    // DB1.DBD6 as REAL
    let temperature = get_real_at(&data, 6);
    println!("DB1.DBD6 = {:.2} (REAL)", temperature);

    // DB1.DBX10.3 as BOOL
    println!("DB1.DBX10.3 = {}", get_bit_at(&data, 10, 3));

    // DB1.DBB12 onward as a fixed-width character field
    let label = get_string_at(&data, 12, 8);
    println!("DB1.DBB12+8 = \"{}\"", label);

    // =========================================================================
    // Large Reads
    // =========================================================================

    println!("\n=== Large Reads ===\n");

    // 1 KiB does not fit one telegram; the client issues as many read
    // requests as the negotiated PDU length requires
    let big = client.read_area(Area::DB, 1, 0, 1024)?;
    println!("Read {} bytes from DB1 in chunks", big.len());

    client.disconnect();
    println!("\nRead example completed!");
    Ok(())
}
