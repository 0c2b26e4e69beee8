use actix_web::{web, get, HttpResponse, Responder};
use humantime::format_duration;
use once_cell::sync::Lazy;
use chrono::Utc;
use std::{
    time::Duration,
    sync::{atomic::{AtomicI64, Ordering}, RwLock},
};
use sysinfo::System;
use serde::Serialize;
use crate::{constants::START_TIME, AppState};

#[derive(Serialize, Clone, Default)]
struct SystemInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
    memory_usage: String,
}

#[derive(Serialize, Clone, Default)]
struct StorageInfo {
    persistence: String,
    snapshot_present: bool,
    card_count: usize,
}

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    today_date: String,
    version: String,
    storage: StorageInfo,
    system: SystemInfo,
}

// Probing sysinfo is the slow part, so that block is refreshed at most
// every few seconds. Storage facts are cheap and always current.
static LAST_PROBE: AtomicI64 = AtomicI64::new(0);
static CACHED_SYSTEM: Lazy<RwLock<SystemInfo>> = Lazy::new(||
    RwLock::new(SystemInfo::default())
);

fn probe_system() -> SystemInfo {
    let mut sys = System::new_all();
    sys.refresh_all();

    let process = sys.process(sysinfo::get_current_pid().unwrap_or(0.into()));
    let memory_usage = process.map_or("Unknown".to_string(), |p|
        format!("{:.2} MB", p.memory() as f64 / 1024.0 / 1024.0)
    );

    SystemInfo {
        os: System::name().unwrap_or_else(|| "Unknown".to_string()),
        kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
        hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        cpu_count: sys.cpus().len(),
        memory_total: format!("{:.2} GB", sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0),
        memory_usage,
    }
}

fn system_info() -> SystemInfo {
    let now = Utc::now().timestamp();
    let last = LAST_PROBE.load(Ordering::Relaxed);

    if now - last > 5 {
        let info = probe_system();
        if let Ok(mut cache) = CACHED_SYSTEM.write() {
            *cache = info.clone();
            LAST_PROBE.store(now, Ordering::Relaxed);
        }
        return info;
    }

    match CACHED_SYSTEM.read() {
        Ok(info) => info.clone(),
        Err(e) => {
            tracing::warn!("HealthCheck cache lock poisoned: {}", e);
            probe_system()
        }
    }
}

#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds() as u64));

    let storage_status = state.card_handler.storage_status().await;
    let storage = StorageInfo {
        persistence: if storage_status.persist_enabled {
            "snapshot".to_string()
        } else {
            "memory-only".to_string()
        },
        snapshot_present: storage_status.snapshot_present,
        card_count: storage_status.card_count,
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy".to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        today_date: now_utc.date_naive().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
        system: system_info(),
    })
}
