//! CLI tool for SMS backup files
//!
//! # Usage
//!
//! ```bash
//! # Count SMS records in a backup
//! smsbackup count backup.xml
//!
//! # List records in a readable table
//! smsbackup show backup.xml
//!
//! # Dump records as JSON lines
//! smsbackup dump backup.xml > messages.jsonl
//!
//! # Build a backup from JSON lines (SMS and MMS records)
//! smsbackup --config smsbackup.toml build messages.jsonl backup.xml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use smsbackup_rs::backup::{count_items, MmsAttachment, MmsRecord, SmsItem};
use smsbackup_rs::config::{Config, LoggingConfig};
use smsbackup_rs::storage::DirectoryAttachmentStore;
use smsbackup_rs::{XmlBackupReader, XmlBackupWriter};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "smsbackup")]
#[command(about = "Read and write SMS Backup & Restore XML files", long_about = None)]
struct Cli {
    /// Configuration file (defaults are used when absent)
    #[arg(short, long, default_value = "smsbackup.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count SMS records
    Count {
        /// Backup file
        file: PathBuf,
    },
    /// List SMS records
    Show {
        /// Backup file
        file: PathBuf,
    },
    /// Print SMS records as JSON lines
    Dump {
        /// Backup file
        file: PathBuf,
    },
    /// Write a backup file from JSON lines
    Build {
        /// JSON lines input, one record per line
        input: PathBuf,
        /// Backup file to create
        output: PathBuf,
    },
}

/// One line of the JSON lines interchange
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "lowercase")]
enum Record {
    Sms(SmsItem),
    Mms(MmsLine),
}

#[derive(Debug, Serialize, Deserialize)]
struct MmsLine {
    date_sent: i64,
    address: String,
    display_body: String,
    #[serde(default)]
    attachments: Vec<AttachmentLine>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AttachmentLine {
    content_type: String,
    data_uri: String,
}

impl From<MmsLine> for MmsRecord {
    fn from(line: MmsLine) -> Self {
        MmsRecord {
            date_sent: line.date_sent,
            address: line.address,
            display_body: line.display_body,
            attachments: line
                .attachments
                .into_iter()
                .map(|a| MmsAttachment::new(a.content_type, a.data_uri))
                .collect(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };

    init_logging(&config.logging);

    match cli.command {
        Commands::Count { file } => {
            let reader = BufReader::new(open(&file)?);
            println!("{}", count_items(reader)?);
        }
        Commands::Show { file } => show(&file)?,
        Commands::Dump { file } => dump(&file)?,
        Commands::Build { input, output } => build(&config, &input, &output)?,
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format.as_str() {
        "json" => tracing::subscriber::set_global_default(builder.json().finish()),
        _ => tracing::subscriber::set_global_default(builder.pretty().finish()),
    };
    result.expect("Failed to set tracing subscriber");
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

fn show(file: &Path) -> Result<()> {
    let reader = XmlBackupReader::open(file)?;

    println!("{:<20} {:<8} {:<18} {}", "Date", "Box", "Address", "Body");
    println!("{:-<80}", "");

    let mut total = 0u64;
    for item in reader {
        let item = item?;
        let date = item
            .sent_at()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| item.date.to_string());
        let body: String = item.body.chars().take(40).collect::<String>().replace(['\r', '\n'], " ");

        println!(
            "{:<20} {:<8} {:<18} {}",
            date,
            item.message_box().to_string(),
            item.address,
            body
        );
        total += 1;
    }

    println!("\nTotal: {} message(s)", total);
    Ok(())
}

fn dump(file: &Path) -> Result<()> {
    let reader = XmlBackupReader::open(file)?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for item in reader {
        serde_json::to_writer(&mut out, &Record::Sms(item?))?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

fn build(config: &Config, input: &Path, output: &Path) -> Result<()> {
    let mut records = Vec::new();
    for (number, line) in BufReader::new(open(input)?).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(&line)
            .with_context(|| format!("Invalid record on line {}", number + 1))?;
        records.push(record);
    }

    let count = records.len();
    let store = DirectoryAttachmentStore::new(&config.backup.attachment_dir);
    let mut writer =
        XmlBackupWriter::create_with_options(output, count, config.backup.writer_options())?;

    for record in records {
        match record {
            Record::Sms(item) => writer.write_item(&item)?,
            Record::Mms(line) => writer.write_mms(&store, &MmsRecord::from(line))?,
        }
    }

    writer.close()?;
    info!("Wrote {} records to {}", count, output.display());
    Ok(())
}
