//! Example: Writing data to PLC memory
//!
//! Run with: cargo run --example simple_write
//!
//! This example demonstrates:
//! - Writing bytes to data blocks and merkers
//! - Encoding typed values with the codec helpers
//! - Read-back verification
//! - Large writes split transparently to the PDU size

use siemens_s7::codec::{set_bit_at, set_dword_at, set_real_at, set_word_at};
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
    // Writing Raw Bytes
    // =========================================================================

    println!("\n=== Writing Raw Bytes ===\n");

    // Write DB1.DBB0..DBB3
    client.write_db(1, 0, &[0x11, 0x22, 0x33, 0x44])?;
    println!("Wrote 4 bytes to DB1.DBB0");

    // Write a merker byte
    client.write_merkers(10, &[0xFF])?;
    println!("Wrote MB10 = 0xFF");

    // =========================================================================
    // Writing Typed Values
    // =========================================================================

    println!("\n=== Writing Typed Values ===\n");

    // Build the image locally, then transfer it in one write
    let mut image = vec![0u8; 12];

    // DBW0 as INT
    set_word_at(&mut image, 0, 1500);

    // DBD2 as DINT
    set_dword_at(&mut image, 2, 100_000);

    // DBD6 as REAL
    set_real_at(&mut image, 6, 23.75);

    // DBX10.0 and DBX10.3 as BOOL
    set_bit_at(&mut image, 10, 0, true);
    set_bit_at(&mut image, 10, 3, true);

    client.write_db(1, 100, &image)?;
    println!("Wrote 12 byte image to DB1.DBB100");

    // =========================================================================
    // Read-Back Verification
    // =========================================================================

    println!("\n=== Read-Back Verification ===\n");

    let readback = client.read_db(1, 100, 12)?;
    if readback == image {
        println!("Read-back matches the written image");
    } else {
        println!("Mismatch! wrote {:02X?}, read {:02X?}", image, readback);
    }

    // =========================================================================
    // Writing Timers and Counters
    // =========================================================================

    println!("\n=== Writing Timers and Counters ===\n");

    // Two bytes per element; data length must form whole elements
    let mut presets = vec![0u8; 4];
    set_word_at(&mut presets, 0, 0x0250);
    set_word_at(&mut presets, 2, 0x0100);
    client.write_timers(0, &presets)?;
    println!("Wrote presets for T0 and T1");

    client.write_counters(0, &presets)?;
    println!("Wrote presets for C0 and C1");

    // =========================================================================
    // Large Writes
    // =========================================================================

    println!("\n=== Large Writes ===\n");

    // A ramp pattern over 600 bytes, written in PDU-sized chunks
    let ramp: Vec<u8> = (0..600).map(|i| (i % 256) as u8).collect();
    client.write_area(Area::DB, 1, 0, &ramp)?;
    println!("Wrote {} bytes to DB1 in chunks", ramp.len());

    client.disconnect();
    println!("\nWrite example completed!");
    Ok(())
}
