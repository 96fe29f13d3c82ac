// src/classify/mod.rs
//! Classifier chain applied to every posting, whichever feed it came from

pub mod geography;
pub mod staffing;
pub mod title;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::JobPosting;

pub use geography::is_us_location;
pub use staffing::{is_staffing_agency, AgencyBlocklist};
pub use title::{looks_manufacturing, looks_software_automation, title_is_target};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub require_target_title: bool,
    pub include_leadership: bool,
    pub exclude_technicians: bool,
    pub exclude_software_automation: bool,
    pub require_manufacturing_context: bool,
    pub us_only: bool,
    pub exclude_agencies: bool,
    pub extra_agencies: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            require_target_title: true,
            include_leadership: true,
            exclude_technicians: true,
            exclude_software_automation: true,
            require_manufacturing_context: true,
            us_only: true,
            exclude_agencies: true,
            extra_agencies: vec![
                "CyberCoders".to_string(),
                "Kelly Services".to_string(),
                "Insight Global".to_string(),
                "Robert Half".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotTargetTitle,
    Leadership,
    Technician,
    SoftwareAutomation,
    NoManufacturingContext,
    OutsideUs,
    StaffingAgency,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RejectReason::NotTargetTitle => "title not a controls/automation role",
            RejectReason::Leadership => "leadership title excluded",
            RejectReason::Technician => "technician title",
            RejectReason::SoftwareAutomation => "software/test automation",
            RejectReason::NoManufacturingContext => "no manufacturing context",
            RejectReason::OutsideUs => "outside the US",
            RejectReason::StaffingAgency => "staffing agency",
        };
        f.write_str(label)
    }
}

/// Composed classifier. Checks run title, technician, software, manufacturing,
/// geography, agency; the first failing check is reported.
#[derive(Debug, Clone)]
pub struct JobFilter {
    options: FilterOptions,
    agencies: AgencyBlocklist,
}

impl JobFilter {
    pub fn new(options: FilterOptions) -> Self {
        let agencies = AgencyBlocklist::new(&options.extra_agencies);
        Self { options, agencies }
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn keeps(&self, job: &JobPosting) -> bool {
        self.rejection(job).is_none()
    }

    pub fn rejection(&self, job: &JobPosting) -> Option<RejectReason> {
        self.content_rejection(&job.title, &job.blob())
            .or_else(|| self.location_rejection(&job.location, &job.location_area))
            .or_else(|| self.company_rejection(&job.company))
    }

    /// Title and description checks only
    pub fn content_rejection(&self, title: &str, blob: &str) -> Option<RejectReason> {
        let opts = &self.options;

        if opts.require_target_title {
            if !title::title_is_target(title) {
                return Some(RejectReason::NotTargetTitle);
            }
            if !opts.include_leadership && !title::title_is_engineering(title) {
                return Some(RejectReason::Leadership);
            }
        }
        if opts.exclude_technicians && title::title_is_technician(title) {
            return Some(RejectReason::Technician);
        }
        if opts.exclude_software_automation && title::looks_software_automation(blob) {
            return Some(RejectReason::SoftwareAutomation);
        }
        if opts.require_manufacturing_context && !title::looks_manufacturing(blob) {
            return Some(RejectReason::NoManufacturingContext);
        }
        None
    }

    pub fn location_rejection(&self, location: &str, area: &[String]) -> Option<RejectReason> {
        if self.options.us_only && !geography::is_us_location(location, area) {
            return Some(RejectReason::OutsideUs);
        }
        None
    }

    pub fn company_rejection(&self, company: &str) -> Option<RejectReason> {
        if self.options.exclude_agencies && self.agencies.is_staffing_agency(company) {
            return Some(RejectReason::StaffingAgency);
        }
        None
    }
}

impl Default for JobFilter {
    fn default() -> Self {
        Self::new(FilterOptions::default())
    }
}
