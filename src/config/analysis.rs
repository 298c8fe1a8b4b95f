//! Health report over all projects.

use crate::constants::LARGE_HISTORY_THRESHOLD;
use crate::models::Project;
use serde::Serialize;
use std::collections::BTreeMap;

/// Projects grouped by the housekeeping issue they exhibit.
///
/// A project may appear in several lists. `unused` and `large_history` are
/// mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectAnalysis {
    /// Project directories that no longer exist
    pub missing_directories: Vec<String>,
    /// Projects with no history
    pub unused: Vec<String>,
    /// Projects above the history threshold, largest first
    pub large_history: Vec<(String, usize)>,
    /// Projects whose trust dialog was never accepted
    pub untrusted: Vec<String>,
    pub total_projects: usize,
    pub total_history_entries: usize,
    /// Sum of [`Project::size_estimate`] in bytes
    pub total_size_estimate: usize,
}

impl ProjectAnalysis {
    #[must_use]
    pub fn analyze(projects: &BTreeMap<String, Project>) -> Self {
        let mut analysis = Self {
            total_projects: projects.len(),
            ..Self::default()
        };

        for (path, project) in projects {
            let history = project.history_count();
            analysis.total_history_entries += history;
            analysis.total_size_estimate += project.size_estimate();

            if !project.directory_exists {
                analysis.missing_directories.push(path.clone());
            }
            if history == 0 {
                analysis.unused.push(path.clone());
            } else if history > LARGE_HISTORY_THRESHOLD {
                analysis.large_history.push((path.clone(), history));
            }
            if !project.has_trust_dialog_accepted {
                analysis.untrusted.push(path.clone());
            }
        }

        // Stable sort keeps path order among equal counts.
        analysis.large_history.sort_by(|a, b| b.1.cmp(&a.1));
        analysis
    }

    /// No project has any issue.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.missing_directories.is_empty()
            && self.unused.is_empty()
            && self.large_history.is_empty()
            && self.untrusted.is_empty()
    }
}
