//! Plugin entry point for hosts that load analyzers by name.

use crate::analyzer::{Analyzer, ANALYZER};

/// Exposes the linterlog analyzer to a host.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzerPlugin;

impl AnalyzerPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Analyzers provided by this plugin.
    pub fn get_analyzers(&self) -> Vec<&'static Analyzer> {
        vec![&ANALYZER]
    }
}
