//! Example: Reading CPU identity and diagnostics
//!
//! Run with: cargo run --example plc_info
//!
//! This example demonstrates:
//! - Order code, firmware version and module identity
//! - Communication capabilities and protection levels
//! - CPU clock and run state
//! - Block metadata and raw SZL access

use siemens_s7::{BlockType, Client, ClientConfig};
use std::net::Ipv4Addr;

fn main() -> siemens_s7::Result<()> {
    // =========================================================================
    // Connect to PLC
    // =========================================================================

    let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    let mut client = Client::connect_to(config)?;
    println!("Connected, PDU length = {}", client.pdu_length());

    // =========================================================================
    // Module Identity
    // =========================================================================

    println!("\n=== Module Identity ===\n");

    let order_code = client.get_order_code()?;
    println!("Order code: {}", order_code.code);
    println!("Firmware:   V{}", order_code.firmware_version());

    let cpu_info = client.get_cpu_info()?;
    println!("Module:     {}", cpu_info.module_type_name);
    println!("Name:       {}", cpu_info.as_name);
    println!("Serial:     {}", cpu_info.serial_number);
    println!("Copyright:  {}", cpu_info.copyright);

    // =========================================================================
    // Communication Capabilities
    // =========================================================================

    println!("\n=== Communication Capabilities ===\n");

    let cp_info = client.get_cp_info()?;
    println!("Max PDU length:  {}", cp_info.max_pdu_length);
    println!("Max connections: {}", cp_info.max_connections);
    println!("MPI rate:        {} bps", cp_info.max_mpi_rate);
    println!("Bus rate:        {} bps", cp_info.max_bus_rate);

    // =========================================================================
    // Protection and Run State
    // =========================================================================

    println!("\n=== Protection and Run State ===\n");

    let protection = client.get_protection()?;
    println!("Protection level:  {}", protection.sch_schal);
    println!("Password level:    {}", protection.sch_par);
    println!("Valid level:       {}", protection.sch_rel);
    println!("Mode selector:     {}", protection.bart_sch);

    let status = client.get_plc_status()?;
    println!("CPU state:         {}", status);

    let clock = client.get_plc_date_time()?;
    println!("CPU clock:         {}", clock);

    // =========================================================================
    // Block Metadata
    // =========================================================================

    println!("\n=== Block Metadata ===\n");

    let info = client.get_block_info(BlockType::DB, 1)?;
    println!("DB1:");
    println!("  MC7 size:   {} bytes", info.mc7_size);
    println!("  Load size:  {} bytes", info.load_size);
    println!("  Local data: {} bytes", info.local_data);
    println!("  Author:     {}", info.author);
    println!("  Family:     {}", info.family);
    if let Some(date) = info.code_date() {
        println!("  Code date:  {}", date);
    }

    // =========================================================================
    // Raw SZL Access
    // =========================================================================

    println!("\n=== Raw SZL Access ===\n");

    // SZL 0x0011: module identification, one record per sub-module
    let szl = client.read_szl(0x0011, 0x0000)?;
    println!(
        "SZL 0x0011: {} records of {} bytes",
        szl.record_count, szl.record_length
    );
    for (i, record) in szl.records().enumerate() {
        println!("  record {}: {:02X?}", i, record);
    }

    client.disconnect();
    println!("\nInfo example completed!");
    Ok(())
}
