use crate::app::ApplicationRegistry;
use crate::config::toml_config::{DayConfig, HarnessConfig};
use crate::core::mount::{Harness, MountHandle};
use crate::domain::model::Part;
use crate::domain::ports::Application;
use crate::utils::error::{HarnessError, Result};
use std::sync::Arc;

/// One part of one day, resolved against the registry.
#[derive(Clone)]
pub struct PlannedMount {
    pub day: String,
    pub application: Arc<dyn Application>,
    pub part: Part,
    pub input: String,
}

/// A mount that has been issued but not awaited yet.
pub struct PendingMount {
    pub day: String,
    pub handle: MountHandle,
}

#[derive(Debug)]
pub struct MountFailure {
    pub day: String,
    pub part: Part,
    pub locator: String,
    pub error: HarnessError,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub mounted: usize,
    pub initialized: usize,
    pub failures: Vec<MountFailure>,
}

impl RunReport {
    pub fn all_initialized(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Mounts every configured part of the selected days.
pub struct Runner {
    config: HarnessConfig,
    registry: ApplicationRegistry,
    harness: Harness,
}

impl Runner {
    pub fn new(config: HarnessConfig, registry: ApplicationRegistry, harness: Harness) -> Self {
        Self {
            config,
            registry,
            harness,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Enabled days in config order, or exactly the named ones when `filter`
    /// is non-empty (named days are selected even if disabled).
    pub fn selected_days(&self, filter: &[String]) -> Result<Vec<&DayConfig>> {
        if filter.is_empty() {
            return Ok(self.config.days.iter().filter(|d| d.is_enabled()).collect());
        }

        filter
            .iter()
            .map(|name| {
                self.config
                    .day(name)
                    .ok_or_else(|| HarnessError::UnknownDayError { name: name.clone() })
            })
            .collect()
    }

    /// Resolves every application up front so nothing is mounted when one
    /// of them is missing.
    pub fn plan(&self, filter: &[String]) -> Result<Vec<PlannedMount>> {
        let mut planned = Vec::new();
        for day in self.selected_days(filter)? {
            let application = self.registry.get(&day.application)?;
            for part in &day.parts {
                planned.push(PlannedMount {
                    day: day.name.clone(),
                    application: Arc::clone(&application),
                    part: part.part,
                    input: part.input.clone(),
                });
            }
        }
        Ok(planned)
    }

    pub fn mount_all(&self, filter: &[String]) -> Result<Vec<PendingMount>> {
        let planned = self.plan(filter)?;
        tracing::info!("🚀 Mounting {} part(s)", planned.len());

        Ok(planned
            .into_iter()
            .map(|mount| PendingMount {
                handle: self
                    .harness
                    .mount(mount.application, mount.part, mount.input),
                day: mount.day,
            })
            .collect())
    }

    pub async fn settle(pending: Vec<PendingMount>) -> RunReport {
        let mut report = RunReport {
            mounted: pending.len(),
            ..RunReport::default()
        };

        for PendingMount { day, handle } in pending {
            let part = handle.part();
            let locator = handle.locator().to_string();
            match handle.settled().await {
                Ok(_) => {
                    tracing::debug!("✅ {} part {} initialized", day, part);
                    report.initialized += 1;
                }
                Err(error) => report.failures.push(MountFailure {
                    day,
                    part,
                    locator,
                    error,
                }),
            }
        }

        report
    }

    pub async fn run(&self, filter: &[String]) -> Result<RunReport> {
        let pending = self.mount_all(filter)?;
        Ok(Self::settle(pending).await)
    }
}
