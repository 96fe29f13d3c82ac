// src/classify/staffing.rs
//! Staffing agency detection by company display name

pub const DEFAULT_AGENCY_BLOCKLIST: &[&str] = &[
    "adecco", "randstad", "manpower", "manpowergroup", "experis", "hays", "robert half",
    "kelly", "kelly services", "kellyocg", "aerotek", "actalent", "kforce", "insight global",
    "beacon hill", "on assignment", "asgn", "volt", "system one", "people ready", "appleone",
    "motion recruitment", "nelson", "collabera", "yoh", "prolink", "medix", "pds tech",
    "teksystems", "tek systems", "cybercoders", "cyber coders", "jobot", "gpac",
    "talentbridge", "talent bridge", "ettain", "ettain group", "diversant", "mindlance",
    "aston carter", "allegis", "matrix resources", "amerit", "vaco", "cyberthink",
    "mindseekers", "collabera digital", "michael page", "pagegroup", "page personnel",
    "trillium", "harvey nash", "signature consultants", "atrium staffing",
    "cornerstone staffing", "trc staffing", "rht", "aquent", "apple one", "lucid staffing",
    "talentburst", "datanomics",
];

const GENERIC_AGENCY_TERMS: &[&str] = &["staffing", "recruit", "agency", "talent"];

/// Built-in blocklist plus caller-supplied names, all lowercased.
#[derive(Debug, Clone)]
pub struct AgencyBlocklist {
    names: Vec<String>,
}

impl AgencyBlocklist {
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Self {
        let mut names: Vec<String> = DEFAULT_AGENCY_BLOCKLIST
            .iter()
            .map(|n| n.to_string())
            .collect();

        for name in extra {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }

        Self { names }
    }

    pub fn is_staffing_agency(&self, company: &str) -> bool {
        if company.trim().is_empty() {
            return false;
        }
        let lower = company.to_lowercase();
        self.names.iter().any(|n| lower.contains(n.as_str()))
            || GENERIC_AGENCY_TERMS.iter().any(|t| lower.contains(t))
    }
}

impl Default for AgencyBlocklist {
    fn default() -> Self {
        Self::new::<&str>(&[])
    }
}

/// One-shot check; builds the blocklist each call.
pub fn is_staffing_agency<S: AsRef<str>>(company: &str, extra: &[S]) -> bool {
    AgencyBlocklist::new(extra).is_staffing_agency(company)
}
