// src/services/dashboard_service.rs

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Months, Utc};

use crate::{
    common::error::AppError,
    db::{DashboardRepository, MaintenanceRepository},
    models::{
        dashboard::{DashboardCounts, DashboardStats, MonthCount, RequestSample},
        equipment::CRITICAL_HEALTH_THRESHOLD,
        maintenance::{MaintenanceRequestDetail, RequestStatus},
        scope::CompanyScope,
    },
};

pub const DEFAULT_RECENT_LIMIT: i64 = 10;
pub const MAX_RECENT_LIMIT: i64 = 100;
const BREAKDOWN_MONTHS: u32 = 6;

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: Arc<dyn DashboardRepository>,
    maintenance_repo: Arc<dyn MaintenanceRepository>,
}

impl DashboardService {
    pub fn new(
        dashboard_repo: Arc<dyn DashboardRepository>,
        maintenance_repo: Arc<dyn MaintenanceRepository>,
    ) -> Self {
        Self { dashboard_repo, maintenance_repo }
    }

    pub async fn get_stats(&self, scope: CompanyScope, now: DateTime<Utc>) -> Result<DashboardStats, AppError> {
        let repo = &self.dashboard_repo;
        let since = now.checked_sub_months(Months::new(BREAKDOWN_MONTHS)).unwrap_or(now);

        // Contagens independentes em paralelo; qualquer falha derruba tudo
        let (
            total_equipment,
            critical_equipment,
            total_requests,
            pending,
            in_progress,
            completed,
            total_teams,
            total_technicians,
            overdue,
            samples,
        ) = tokio::try_join!(
            repo.count_equipment(scope),
            repo.count_critical_equipment(scope, CRITICAL_HEALTH_THRESHOLD),
            repo.count_requests(scope, None),
            repo.count_requests(scope, Some(RequestStatus::Pending)),
            repo.count_requests(scope, Some(RequestStatus::InProgress)),
            repo.count_requests(scope, Some(RequestStatus::Completed)),
            repo.count_teams(scope),
            repo.count_technicians(scope),
            repo.count_overdue(scope, now),
            repo.request_samples(scope, since),
        )?;

        let counts = DashboardCounts {
            total_equipment,
            critical_equipment,
            total_requests,
            pending,
            in_progress,
            completed,
            total_teams,
            total_technicians,
            overdue,
        };

        tracing::debug!(?scope, ?counts, samples = samples.len(), "Dashboard calculado");
        Ok(build_stats(counts, &samples))
    }

    pub async fn get_recent_requests(
        &self,
        scope: CompanyScope,
        limit: i64,
    ) -> Result<Vec<MaintenanceRequestDetail>, AppError> {
        self.maintenance_repo.recent(scope, limit).await
    }
}

/// Monta o objeto final a partir das contagens e das amostras da janela de 6 meses.
pub fn build_stats(counts: DashboardCounts, samples: &[RequestSample]) -> DashboardStats {
    let mut status_breakdown = BTreeMap::new();
    let mut type_breakdown = BTreeMap::new();
    for sample in samples {
        *status_breakdown.entry(sample.status.as_str().to_string()).or_insert(0) += 1;
        *type_breakdown.entry(sample.request_type.as_str().to_string()).or_insert(0) += 1;
    }

    DashboardStats {
        total_equipment: counts.total_equipment,
        critical: counts.critical_equipment,
        total_requests: counts.total_requests,
        pending: counts.pending,
        in_progress: counts.in_progress,
        completed: counts.completed,
        overdue: counts.overdue,
        total_teams: counts.total_teams,
        total_technicians: counts.total_technicians,
        load: technician_load(counts.in_progress, counts.total_technicians),
        status_breakdown,
        type_breakdown,
        month_breakdown: month_breakdown(samples),
    }
}

/// `min(100, round(in_progress / technicians * 100))`; 0 sem técnicos.
pub fn technician_load(in_progress: i64, technicians: i64) -> u8 {
    if technicians <= 0 || in_progress <= 0 {
        return 0;
    }
    let pct = (in_progress as f64 / technicians as f64 * 100.0).round();
    pct.min(100.0) as u8
}

// Agrupa por mês (nome curto, sem ano), em ordem cronológica.
pub fn month_breakdown(samples: &[RequestSample]) -> Vec<MonthCount> {
    let mut ordered: Vec<&RequestSample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.created_at);

    let mut months: Vec<MonthCount> = Vec::new();
    for sample in ordered {
        let label = sample.created_at.format("%b").to_string();
        match months.iter_mut().find(|m| m.month == label) {
            Some(bucket) => bucket.count += 1,
            None => months.push(MonthCount { month: label, count: 1 }),
        }
    }
    months
}

/// `limit` ausente, inválido ou 0 -> 10; acima de 100 -> 100.
pub fn normalize_limit(raw: Option<&str>) -> i64 {
    match raw.and_then(|value| value.trim().parse::<i64>().ok()) {
        Some(limit) if limit > 0 => limit.min(MAX_RECENT_LIMIT),
        _ => DEFAULT_RECENT_LIMIT,
    }
}
