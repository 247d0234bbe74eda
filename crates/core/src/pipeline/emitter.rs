//! Renders and retains one generated unit per descriptor

use super::template;
use crate::{
    config::Config,
    types::{TypeDescriptor, TypeIdentity},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A generated source artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionUnit {
    pub hint_name: String,
    pub descriptor: TypeDescriptor,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitOutcome {
    Rendered,
    Reused,
}

/// Naming settings shared by every unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterSettings {
    pub operation_suffix: String,
    pub platform_tag: String,
    pub file_extension: String,
}

impl From<&Config> for EmitterSettings {
    fn from(config: &Config) -> Self {
        Self {
            operation_suffix: config.operation_suffix.clone(),
            platform_tag: config.platform_tag.clone(),
            file_extension: config.file_extension.clone(),
        }
    }
}

/// Holds the units of a compilation session keyed by descriptor identity.
///
/// A unit is only re-rendered when the descriptor for its identity changes.
#[derive(Debug)]
pub struct Emitter {
    settings: EmitterSettings,
    units: BTreeMap<TypeIdentity, EmissionUnit>,
    renders: usize,
}

impl Emitter {
    pub fn new(settings: EmitterSettings) -> Self {
        Self {
            settings,
            units: BTreeMap::new(),
            renders: 0,
        }
    }

    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    /// `{Name}{Suffix}.g.{PlatformTag}.{Extension}`
    pub fn hint_name(&self, descriptor: &TypeDescriptor) -> String {
        format!(
            "{}{}.g.{}.{}",
            descriptor.name,
            self.settings.operation_suffix,
            self.settings.platform_tag,
            self.settings.file_extension
        )
    }

    pub fn emit(&mut self, descriptor: &TypeDescriptor) -> EmitOutcome {
        let identity = descriptor.identity();
        if let Some(unit) = self.units.get(&identity) {
            if &unit.descriptor == descriptor {
                tracing::debug!("Reusing {}", unit.hint_name);
                return EmitOutcome::Reused;
            }
        }

        let hint_name = self.hint_name(descriptor);
        let source = template::render(descriptor, &self.settings.operation_suffix);
        self.renders += 1;
        tracing::debug!("Rendered {} ({} bytes)", hint_name, source.len());

        self.units.insert(
            identity,
            EmissionUnit {
                hint_name,
                descriptor: descriptor.clone(),
                source,
            },
        );
        EmitOutcome::Rendered
    }

    /// Drop every unit whose identity is not in `live`, returning the dropped units
    pub fn retain(&mut self, live: &HashSet<TypeIdentity>) -> Vec<EmissionUnit> {
        let stale: Vec<TypeIdentity> = self
            .units
            .keys()
            .filter(|identity| !live.contains(*identity))
            .cloned()
            .collect();

        stale
            .into_iter()
            .filter_map(|identity| self.units.remove(&identity))
            .inspect(|unit| tracing::debug!("Removed {}", unit.hint_name))
            .collect()
    }

    /// Adopt a unit produced by an earlier session. Units whose name does not
    /// match the current naming settings are ignored.
    pub fn restore(&mut self, unit: EmissionUnit) -> bool {
        if unit.hint_name != self.hint_name(&unit.descriptor) {
            return false;
        }
        self.units.insert(unit.descriptor.identity(), unit);
        true
    }

    pub fn unit(&self, identity: &TypeIdentity) -> Option<&EmissionUnit> {
        self.units.get(identity)
    }

    pub fn units(&self) -> impl Iterator<Item = &EmissionUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Renders performed over the emitter's lifetime
    pub fn render_count(&self) -> usize {
        self.renders
    }
}
