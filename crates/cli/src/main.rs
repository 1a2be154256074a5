use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ward_core::{
    config::{disposition_types_from_env_value, page_size_from_env_value},
    constants::DEFAULT_PAGE_SIZE,
    filter_beds, filter_requests,
    pagination::drain,
    reconcile, AdmissionLocation, BedLayout, InpatientAdmission, InpatientRequest,
    PagedAdmissions, WardConfig, WardPatient, WardSession, WardView,
};
use ward_openmrs::{AdmissionLocationDoc, InpatientAdmissionDoc, InpatientRequestDoc};

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Inpatient ward view CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile beds and admissions and print the ward
    View {
        /// Admission-location document (JSON or YAML)
        #[arg(long)]
        location: PathBuf,
        /// Inpatient admissions document (JSON or YAML)
        #[arg(long)]
        admissions: PathBuf,
        /// Replay admissions in pages of this size, reconciling after each page
        #[arg(long)]
        page_size: Option<usize>,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print bed and patient counts
    Census {
        /// Admission-location document (JSON or YAML)
        #[arg(long)]
        location: PathBuf,
        /// Inpatient admissions document (JSON or YAML)
        #[arg(long)]
        admissions: PathBuf,
    },
    /// List requests pending for a ward
    Requests {
        /// Inpatient requests document (JSON or YAML)
        #[arg(long)]
        requests: PathBuf,
        /// Ward location uuid
        #[arg(long)]
        ward: String,
        /// Disposition types (comma-separated, default ADMIT,TRANSFER)
        #[arg(long)]
        types: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ward=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::View {
            location,
            admissions,
            page_size,
            json,
        }) => {
            let location = load_location(&location)?;
            let admissions = load_admissions(&admissions)?;
            let bed_layouts = filter_beds(&location);

            let page_size = match page_size {
                Some(n) => Some(n),
                None => std::env::var("WARD_PAGE_SIZE")
                    .ok()
                    .map(|v| page_size_from_env_value(Some(v)))
                    .transpose()?,
            };

            let view = match page_size {
                Some(n) => {
                    let cfg = WardConfig::default().with_page_size(n)?;
                    replay_pages(bed_layouts, admissions, cfg.page_size())?
                }
                None => reconcile(&bed_layouts, &admissions),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_view(&location, &view));
            }
        }
        Some(Commands::Census {
            location,
            admissions,
        }) => {
            let location = load_location(&location)?;
            let admissions = load_admissions(&admissions)?;
            let view = reconcile(&filter_beds(&location), &admissions);
            println!("{}", render_census(&view));
        }
        Some(Commands::Requests {
            requests,
            ward,
            types,
        }) => {
            let types = disposition_types_from_env_value(
                types.or_else(|| std::env::var("WARD_DISPOSITION_TYPES").ok()),
            )?;
            let cfg = WardConfig::new(DEFAULT_PAGE_SIZE, types)?;
            let requests = load_requests(&requests)?;
            let pending = filter_requests(&requests, ward.trim(), cfg.disposition_types());
            if pending.is_empty() {
                println!("No pending requests.");
            } else {
                for request in pending {
                    println!("{}", render_request(request));
                }
            }
        }
        None => {
            println!("Use 'ward --help' for commands");
        }
    }

    Ok(())
}

/// Read a JSON or YAML document; `.yaml`/`.yml` files go through the YAML parser.
fn read_document(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let value: serde_json::Value = if is_yaml {
        serde_yaml::from_str(&text).with_context(|| format!("parsing YAML {}", path.display()))?
    } else {
        serde_json::from_str(&text).with_context(|| format!("parsing JSON {}", path.display()))?
    };
    Ok(value)
}

fn load_location(path: &Path) -> anyhow::Result<AdmissionLocation> {
    let value = read_document(path)?;
    AdmissionLocationDoc::from_value(value).with_context(|| format!("in {}", path.display()))
}

fn load_admissions(path: &Path) -> anyhow::Result<Vec<InpatientAdmission>> {
    let page = InpatientAdmissionDoc::from_value(read_document(path)?)
        .with_context(|| format!("in {}", path.display()))?;
    if page.has_more {
        tracing::warn!(
            "{} advertises more admissions; showing the {} loaded",
            path.display(),
            page.results.len()
        );
    }
    Ok(page.results)
}

fn load_requests(path: &Path) -> anyhow::Result<Vec<InpatientRequest>> {
    let page = InpatientRequestDoc::from_value(read_document(path)?)
        .with_context(|| format!("in {}", path.display()))?;
    Ok(page.results)
}

/// Feed admissions to a session page by page, as the ward view does while scrolling.
fn replay_pages(
    bed_layouts: Vec<BedLayout>,
    admissions: Vec<InpatientAdmission>,
    page_size: usize,
) -> anyhow::Result<WardView> {
    let mut session = WardSession::new();
    session.set_bed_layouts(bed_layouts);

    let mut cursor = PagedAdmissions::new(admissions, page_size);
    let mut page = 0usize;
    drain(&mut cursor, |snapshot| {
        page += 1;
        session.set_admissions(snapshot.to_vec());
        let census = session.view().census();
        tracing::info!(
            page,
            loaded = snapshot.len(),
            unassigned = census.unassigned_patients,
            degraded = census.degraded_patients,
            "admissions page reconciled"
        );
    })?;

    Ok(session.view().as_ref().clone())
}

fn patient_label(wp: &WardPatient) -> String {
    let name = wp.patient.display.as_deref().unwrap_or("Unknown patient");
    let mut label = format!("{name} ({})", wp.patient_uuid());
    if let Some(visit) = &wp.visit {
        label.push_str(&format!(" visit {}", visit.uuid));
    }
    if let Some(request) = &wp.inpatient_request {
        label.push_str(&format!(" [{} requested]", request.disposition_type));
    }
    if wp.is_degraded() {
        label.push_str(" (no admission record)");
    }
    label
}

fn render_view(location: &AdmissionLocation, view: &WardView) -> String {
    let ward = location.ward.display.as_deref().unwrap_or("Ward");
    let mut lines = vec![format!("{ward} ({})", location.ward.uuid)];

    if view.beds.is_empty() {
        lines.push("No beds configured for this location".into());
    }
    for bed in &view.beds {
        lines.push(format!("Bed {}", bed.bed.bed_number));
        if bed.ward_patients.is_empty() {
            lines.push("  (empty)".into());
        }
        lines.extend(bed.ward_patients.iter().map(|wp| format!("  - {}", patient_label(wp))));
    }

    if !view.unassigned.is_empty() {
        lines.push("Unassigned".into());
        lines.extend(view.unassigned.iter().map(|wp| format!("  - {}", patient_label(wp))));
    }

    lines.push(render_census(view));
    lines.push(String::new());
    lines.join("\n")
}

fn render_census(view: &WardView) -> String {
    let c = view.census();
    format!(
        "Beds: {} ({} occupied, {} empty). Patients: {} in beds, {} unassigned, {} without admission record.",
        c.beds,
        c.occupied_beds,
        c.empty_beds,
        c.assigned_patients,
        c.unassigned_patients,
        c.degraded_patients
    )
}

fn render_request(request: &InpatientRequest) -> String {
    let name = request.patient.display.as_deref().unwrap_or("Unknown patient");
    let mut line = format!(
        "{} {name} ({})",
        request.disposition_type, request.patient.uuid
    );
    if let Some(disposition) = &request.disposition {
        line.push_str(&format!(": {disposition}"));
    }
    line
}
