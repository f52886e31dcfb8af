use std::collections::HashMap;
use std::process::Command;

use thiserror::Error;

/// The GPFS quota reporting utility, resolved through PATH
const MMLSQUOTA: &str = "mmlsquota";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to run mmlsquota: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("mmlsquota exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("quota report is empty")]
    Empty,
    #[error("quota report is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("quota report field `{field}` is not a number: `{value}`")]
    BadNumber {
        field: &'static str,
        value: String,
    },
}

/// One usage/quota/limit triple. Usage may exceed either threshold, and
/// quota may exceed limit; real quota systems allow transient overage
#[derive(Debug, Clone, Copy)]
pub struct QuotaValues {
    pub usage: u64,
    pub quota: u64,
    pub limit: u64,
}

impl QuotaValues {
    /// True when no quota is configured at all for this metric
    pub fn is_unset(&self) -> bool {
        self.usage == 0 && self.quota == 0 && self.limit == 0
    }
}

/// The quota state of one filesystem: block usage in KiB and inode
/// counts, straight from a single report row
#[derive(Debug, Clone)]
pub struct FilesystemQuota {
    pub name: String,
    pub blocks: QuotaValues,
    pub files: QuotaValues,
}

/// Runs `mmlsquota -u <user> -Y` and parses its report
///
/// The invocation is a single blocking call; a missing binary or a
/// non-zero exit is fatal and carries the utility's stderr
pub fn fetch_quotas(user: &str) -> Result<Vec<FilesystemQuota>, ReportError> {
    let output = Command::new(MMLSQUOTA).args(["-u", user, "-Y"]).output()?;
    if !output.status.success() {
        return Err(ReportError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    parse_report(&String::from_utf8_lossy(&output.stdout))
}

/// Parses the colon-delimited `-Y` report: the first line names the
/// fields (with the trailing colon stripped), each following line is a
/// data row keyed positionally by those names
///
/// Only the fields the bars need are consumed; missing keys and
/// non-numeric values are fatal rather than silently rendered wrong
pub fn parse_report(report: &str) -> Result<Vec<FilesystemQuota>, ReportError> {
    let mut lines = report.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next().ok_or(ReportError::Empty)?;
    let names: Vec<&str> = header.trim_end_matches(':').split(':').collect();

    let mut filesystems = Vec::new();
    for line in lines {
        let row: HashMap<&str, &str> = names.iter().copied().zip(line.split(':')).collect();
        filesystems.push(FilesystemQuota {
            name: field(&row, "filesystemName")?.to_string(),
            blocks: QuotaValues {
                usage: numeric_field(&row, "blockUsage")?,
                quota: numeric_field(&row, "blockQuota")?,
                limit: numeric_field(&row, "blockLimit")?,
            },
            files: QuotaValues {
                usage: numeric_field(&row, "filesUsage")?,
                quota: numeric_field(&row, "filesQuota")?,
                limit: numeric_field(&row, "filesLimit")?,
            },
        });
    }
    Ok(filesystems)
}

fn field<'a>(row: &HashMap<&str, &'a str>, name: &'static str) -> Result<&'a str, ReportError> {
    row.get(name).copied().ok_or(ReportError::MissingField(name))
}

fn numeric_field(row: &HashMap<&str, &str>, name: &'static str) -> Result<u64, ReportError> {
    let value = field(row, name)?;
    value.parse().map_err(|_| ReportError::BadNumber {
        field: name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "mmlsquota::HEADER:version:reserved:reserved:filesystemName:quotaType:id:name:blockUsage:blockQuota:blockLimit:filesUsage:filesQuota:filesLimit:";

    #[test]
    fn test_parse_report_rows() {
        let report = format!(
            "{}\n{}\n{}\n",
            HEADER,
            "mmlsquota::0:1:::home:USR:1234:jdoe:1048576:2097152:4194304:1000:2000:3000:",
            "mmlsquota::0:1:::scratch:USR:1234:jdoe:500:1000:2000:10:100:1000:",
        );
        let quotas = parse_report(&report).unwrap();
        assert_eq!(quotas.len(), 2);
        assert_eq!(quotas[0].name, "home");
        assert_eq!(quotas[0].blocks.usage, 1048576);
        assert_eq!(quotas[0].blocks.limit, 4194304);
        assert_eq!(quotas[0].files.quota, 2000);
        assert_eq!(quotas[1].name, "scratch");
        assert_eq!(quotas[1].files.usage, 10);
    }

    #[test]
    fn test_parse_report_skips_blank_lines() {
        let report = format!(
            "{}\n\n{}\n",
            HEADER, "mmlsquota::0:1:::home:USR:1234:jdoe:1:2:3:4:5:6:",
        );
        assert_eq!(parse_report(&report).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_report_is_an_error() {
        assert!(matches!(parse_report(""), Err(ReportError::Empty)));
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let report = "filesystemName:blockUsage:\nhome:42:";
        assert!(matches!(
            parse_report(report),
            Err(ReportError::MissingField("blockQuota")),
        ));
    }

    #[test]
    fn test_non_numeric_field_is_fatal() {
        let report = format!(
            "{}\n{}\n",
            HEADER, "mmlsquota::0:1:::home:USR:1234:jdoe:lots:2:3:4:5:6:",
        );
        match parse_report(&report) {
            Err(ReportError::BadNumber { field, value }) => {
                assert_eq!(field, "blockUsage");
                assert_eq!(value, "lots");
            }
            other => panic!("expected BadNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_unset_metric_detection() {
        let unset = QuotaValues { usage: 0, quota: 0, limit: 0 };
        let set = QuotaValues { usage: 0, quota: 5, limit: 10 };
        assert!(unset.is_unset());
        assert!(!set.is_unset());
    }
}
