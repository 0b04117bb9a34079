//! Filter-string device selection.
//!
//! A selector is a comma-separated list of filters. Each filter is
//! `[backend:][device_type:][index]` with at least one component present:
//! `"opencl"`, `"opencl:gpu"`, `"gpu:0"`, `"level_zero:gpu:0"`, `"1"`.
//! A lone index addresses the whole enumeration; an index after other
//! components addresses the list of devices matching those components, in
//! enumeration order. Without an index the highest-ranked match wins.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::backend::Backend;
use crate::device::{Device, DeviceType};
use crate::error::{Result, RuntimeError};
use crate::registry::Registry;

/// One parsed filter component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filter {
    pub backend: Option<Backend>,
    pub device_type: Option<DeviceType>,
    pub index: Option<usize>,
}

impl Filter {
    /// Whether `device` satisfies the backend and device-type components.
    pub fn matches(&self, device: &Device) -> bool {
        self.backend.map_or(true, |b| device.backend() == b)
            && self.device_type.map_or(true, |t| device.device_type() == t)
    }

    /// Devices this filter admits, with their enumeration positions.
    fn admitted<'d>(&self, devices: &'d [Device]) -> Vec<(usize, &'d Device)> {
        let matched: Vec<(usize, &'d Device)> = devices
            .iter()
            .enumerate()
            .filter(|(_, device)| self.matches(device))
            .collect();
        match self.index {
            Some(index) => matched.into_iter().nth(index).into_iter().collect(),
            None => matched,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(backend) = self.backend {
            parts.push(backend.token().to_string());
        }
        if let Some(device_type) = self.device_type {
            parts.push(device_type.token().to_string());
        }
        if let Some(index) = self.index {
            parts.push(index.to_string());
        }
        f.write_str(&parts.join(":"))
    }
}

/// A parsed device-selection policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelector {
    raw: String,
    filters: Vec<Filter>,
}

impl FilterSelector {
    /// Parse a selector string.
    pub fn parse(raw: &str) -> Result<FilterSelector> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid(raw, "empty selector"));
        }
        let mut filters = Vec::new();
        for part in trimmed.split(',') {
            filters.push(parse_filter(raw, part.trim())?);
        }
        Ok(FilterSelector {
            raw: trimmed.to_string(),
            filters,
        })
    }

    /// The selector string as parsed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Resolve against `devices`. Candidates admitted by any filter
    /// compete on rank; ties go to the earlier enumeration position.
    pub fn select(&self, devices: &[Device]) -> Option<Device> {
        let mut best: Option<(usize, &Device)> = None;
        for filter in &self.filters {
            for (position, device) in filter.admitted(devices) {
                let better = match best {
                    None => true,
                    Some((best_position, best_device)) => {
                        let (score, best_score) =
                            (device.selection_score(), best_device.selection_score());
                        score > best_score || (score == best_score && position < best_position)
                    }
                };
                if better {
                    best = Some((position, device));
                }
            }
        }
        best.map(|(_, device)| device.clone())
    }

    /// Resolve against the process enumeration, erroring when nothing
    /// matches.
    pub fn resolve(&self) -> Result<Device> {
        let selected = self.select(Registry::global().devices());
        match selected {
            Some(device) => {
                debug!("selector '{}' resolved to {}", self.raw, device.summary());
                Ok(device)
            }
            None => Err(RuntimeError::DeviceNotFound {
                filter: self.raw.clone(),
            }),
        }
    }
}

impl FromStr for FilterSelector {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        FilterSelector::parse(s)
    }
}

impl fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_filter(raw: &str, part: &str) -> Result<Filter> {
    if part.is_empty() {
        return Err(invalid(raw, "empty filter component"));
    }
    let mut filter = Filter::default();
    for token in part.split(':') {
        let token = token.trim();
        if token.is_empty() {
            return Err(invalid(raw, "empty token"));
        }
        if let Some(backend) = Backend::parse_token(token) {
            if filter.backend.is_some() || filter.device_type.is_some() || filter.index.is_some() {
                return Err(invalid(raw, "backend must come first"));
            }
            filter.backend = Some(backend);
        } else if let Some(device_type) = DeviceType::parse_token(token) {
            if filter.device_type.is_some() || filter.index.is_some() {
                return Err(invalid(raw, "device type given twice or after an index"));
            }
            filter.device_type = Some(device_type);
        } else if let Ok(index) = token.parse::<usize>() {
            if filter.index.is_some() {
                return Err(invalid(raw, "more than one index"));
            }
            filter.index = Some(index);
        } else {
            return Err(invalid(raw, format!("unrecognized token '{token}'")));
        }
    }
    Ok(filter)
}

fn invalid(filter: &str, reason: impl Into<String>) -> RuntimeError {
    RuntimeError::InvalidFilter {
        filter: filter.to_string(),
        reason: reason.into(),
    }
}
