//! LTE Cell-specific Reference Signal dump tool
//!
//! Generates the downlink CRS of a cell for one radio frame, maps them on
//! slot grids and writes the pilots as JSON.

mod config;

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use common::types::{CyclicPrefix, PhysicalCellId};
use common::utils::slot_len;
use common::utils::time::subframe_of_slot;
use config::ToolConfig;
use layers::phy::{CellReferenceSignal, CellRsTable, SlotGrid};

/// LTE CRS dump tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Physical Cell ID (0-503)
    #[arg(long)]
    pci: Option<u16>,

    /// Number of downlink resource blocks (6-110)
    #[arg(long)]
    nof_prb: Option<u16>,

    /// Number of cell-specific antenna ports (1, 2 or 4)
    #[arg(long)]
    nof_ports: Option<u8>,

    /// Use extended cyclic prefix
    #[arg(long)]
    extended_cp: bool,

    /// Slot to dump, repeat for several (default: whole frame)
    #[arg(long = "slot")]
    slots: Vec<u8>,

    /// JSON output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Serialize)]
struct PilotEntry {
    subcarrier: u16,
    symbol: u8,
    re: f32,
    im: f32,
}

#[derive(Serialize)]
struct PortDump {
    port: u8,
    symbols: Vec<u8>,
    pilots: Vec<PilotEntry>,
}

#[derive(Serialize)]
struct SlotDump {
    ns: u8,
    subframe: u8,
    ports: Vec<PortDump>,
}

#[derive(Serialize)]
struct FrameDump {
    pci: u16,
    nof_prb: u16,
    nof_ports: u8,
    cp: CyclicPrefix,
    slots: Vec<SlotDump>,
}

impl PortDump {
    fn from_set(port: u8, rs: &CellReferenceSignal) -> Self {
        Self {
            port,
            symbols: rs.symbols_ref().to_vec(),
            pilots: rs.refs()
                .iter()
                .map(|re| PilotEntry {
                    subcarrier: re.subcarrier,
                    symbol: re.symbol,
                    re: re.value.re,
                    im: re.value.im,
                })
                .collect(),
        }
    }
}

/// Merge command line overrides into the configuration
fn build_config(args: &Args) -> Result<ToolConfig> {
    let mut config = match &args.config {
        Some(path) => ToolConfig::from_file(path)?,
        None => ToolConfig::default(),
    };

    if let Some(pci) = args.pci {
        config.cell.id = PhysicalCellId::new(pci)
            .ok_or_else(|| anyhow!("Invalid PCI: {}", pci))?;
    }
    if let Some(nof_prb) = args.nof_prb {
        config.cell.nof_prb = nof_prb;
    }
    if let Some(nof_ports) = args.nof_ports {
        config.cell.nof_ports = nof_ports;
    }
    if args.extended_cp {
        config.cell.cp = CyclicPrefix::Extended;
    }
    if !args.slots.is_empty() {
        config.output.slots = Some(args.slots.clone());
    }
    if let Some(output) = &args.output {
        config.output.path = Some(output.clone());
    }
    if let Some(level) = &args.log_level {
        config.log.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

fn dump_frame(config: &ToolConfig) -> Result<FrameDump> {
    let cell = config.cell;
    let table = CellRsTable::new(&cell)?;

    let mut grids = (0..cell.nof_ports)
        .map(|_| SlotGrid::new(&cell))
        .collect::<Result<Vec<_>, _>>()?;

    let mut slots = Vec::new();
    for ns in config.slots() {
        grids.iter_mut().for_each(SlotGrid::clear);
        table.put_slot(ns, &mut grids)?;

        let mut ports = Vec::with_capacity(cell.nof_ports as usize);
        for port in 0..cell.nof_ports {
            let rs = table.get(port, ns)
                .ok_or_else(|| anyhow!("No CRS for port {} slot {}", port, ns))?;
            ports.push(PortDump::from_set(port, rs));
        }

        let mapped: usize = grids.iter()
            .filter_map(|g| g.as_slice())
            .map(|s| s.iter().filter(|v| v.norm_sqr() > 0.0).count())
            .sum();
        let total = slot_len(cell.nof_prb, cell.cp) * grids.len();
        info!("Slot {} (subframe {}): {} of {} REs carry CRS on {} ports",
              ns, subframe_of_slot(ns), mapped, total, cell.nof_ports);

        slots.push(SlotDump {
            ns,
            subframe: subframe_of_slot(ns),
            ports,
        });
    }

    Ok(FrameDump {
        pci: cell.id.0,
        nof_prb: cell.nof_prb,
        nof_ports: cell.nof_ports,
        cp: cell.cp,
        slots,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Cell configuration:");
    info!("  PCI: {}", config.cell.id.0);
    info!("  PRB: {}", config.cell.nof_prb);
    info!("  Ports: {}", config.cell.nof_ports);
    info!("  CP: {:?}", config.cell.cp);

    let dump = dump_frame(&config)?;

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&dump)?
    } else {
        serde_json::to_string(&dump)?
    };

    match &config.output.path {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("CRS written to {}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    debug!("Done");
    Ok(())
}
