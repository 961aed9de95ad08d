/// Generic labels stripped from the left of a hostname.
const BOILERPLATE_PREFIXES: &[&str] = &["www", "jobs", "careers", "apply", "boards", "job-boards"];

/// Hosted applicant-tracking and job-board domains, with the name used when
/// the host carries no tenant label of its own.
const ATS_SUFFIXES: &[(&str, &str)] = &[
    ("lever.co", "lever"),
    ("greenhouse.io", "greenhouse"),
    ("myworkdayjobs.com", "workday"),
    ("workday.com", "workday"),
    ("ashbyhq.com", "ashby"),
    ("smartrecruiters.com", "smartrecruiters"),
    ("bamboohr.com", "bamboohr"),
    ("recruitee.com", "recruitee"),
    ("workable.com", "workable"),
    ("breezy.hr", "breezy"),
    ("jobvite.com", "jobvite"),
    ("icims.com", "icims"),
    ("linkedin.com", "linkedin"),
];

/// Second-level labels that belong to the public suffix (`acme.co.uk`).
const SECOND_LEVEL_SUFFIXES: &[&str] = &["co", "com", "org", "net", "ac", "gov", "edu"];

/// Reduce a hostname to the label that best names the organization.
///
/// `apply.careers.microsoft.com` becomes `microsoft`, `company.greenhouse.io`
/// becomes `company`, `acme.wd5.myworkdayjobs.com` becomes `acme`.
pub fn extract_clean_hostname(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    let host = host.split(':').next().unwrap_or_default();
    if host.parse::<std::net::Ipv4Addr>().is_ok() {
        return host.replace('.', "-");
    }
    let mut labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

    while labels.len() > 1 && BOILERPLATE_PREFIXES.contains(&labels[0]) {
        labels.remove(0);
    }

    let joined = labels.join(".");
    for (suffix, ats_name) in ATS_SUFFIXES {
        if joined == *suffix {
            return (*ats_name).to_string();
        }
        if let Some(tenant) = joined.strip_suffix(suffix).and_then(|t| t.strip_suffix('.')) {
            let tenant_labels: Vec<&str> = tenant
                .split('.')
                .filter(|l| !is_workday_shard(l) && !BOILERPLATE_PREFIXES.contains(l))
                .collect();
            return match tenant_labels.last() {
                Some(label) => (*label).to_string(),
                None => (*ats_name).to_string(),
            };
        }
    }

    registrable_label(&labels).to_string()
}

/// Last label before the public suffix, or the only label there is.
fn registrable_label<'a>(labels: &[&'a str]) -> &'a str {
    match labels.len() {
        0 => "",
        1 => labels[0],
        n => {
            let second_level = labels[n - 2];
            let has_compound_suffix = n >= 3
                && labels[n - 1].len() == 2
                && SECOND_LEVEL_SUFFIXES.contains(&second_level);
            if has_compound_suffix {
                labels[n - 3]
            } else {
                second_level
            }
        }
    }
}

fn is_workday_shard(label: &str) -> bool {
    label
        .strip_prefix("wd")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boilerplate_prefixes_are_stripped_repeatedly() {
        assert_eq!(extract_clean_hostname("apply.careers.microsoft.com"), "microsoft");
        assert_eq!(extract_clean_hostname("careers.stripe.com"), "stripe");
        assert_eq!(extract_clean_hostname("www.example.com"), "example");
    }

    #[test]
    fn ats_suffixes_leave_the_tenant() {
        assert_eq!(extract_clean_hostname("company.greenhouse.io"), "company");
        assert_eq!(extract_clean_hostname("acme.wd5.myworkdayjobs.com"), "acme");
        assert_eq!(extract_clean_hostname("Acme.Recruitee.com"), "acme");
    }

    #[test]
    fn bare_ats_host_falls_back_to_ats_name() {
        assert_eq!(extract_clean_hostname("jobs.lever.co"), "lever");
        assert_eq!(extract_clean_hostname("boards.greenhouse.io"), "greenhouse");
        assert_eq!(extract_clean_hostname("www.linkedin.com"), "linkedin");
    }

    #[test]
    fn compound_public_suffix_is_skipped() {
        assert_eq!(extract_clean_hostname("jobs.acme.co.uk"), "acme");
        assert_eq!(extract_clean_hostname("localhost:8080"), "localhost");
        assert_eq!(extract_clean_hostname("127.0.0.1:8080"), "127-0-0-1");
        assert_eq!(extract_clean_hostname(""), "");
    }
}
