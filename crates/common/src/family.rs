use std::fmt;
use std::str::FromStr;

/// Metric family an alert rule watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertFamily {
    ProbeSuccess,
    ProbeDuration,
    SslCertExpiry,
}

impl AlertFamily {
    /// Families in the order their alerts appear in a generated rule set.
    pub const ALL: [AlertFamily; 3] = [
        AlertFamily::ProbeDuration,
        AlertFamily::ProbeSuccess,
        AlertFamily::SslCertExpiry,
    ];

    pub fn comparison(&self) -> Comparison {
        match self {
            Self::ProbeDuration => Comparison::GreaterThan,
            Self::ProbeSuccess | Self::SslCertExpiry => Comparison::LessThan,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProbeSuccess => "probe_success",
            Self::ProbeDuration => "probe_duration",
            Self::SslCertExpiry => "ssl_cert_expiry",
        }
    }
}

impl fmt::Display for AlertFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "probe_success" | "success" => Ok(Self::ProbeSuccess),
            "probe_duration" | "duration" => Ok(Self::ProbeDuration),
            "ssl_cert_expiry" | "ssl" | "cert" => Ok(Self::SslCertExpiry),
            _ => Err(format!("unknown alert family: {s}")),
        }
    }
}

/// Severity preset. Lower tiers alert later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlertSensitivity {
    High,
    Medium,
    Low,
}

impl AlertSensitivity {
    pub const ALL: [AlertSensitivity; 3] = [
        AlertSensitivity::High,
        AlertSensitivity::Medium,
        AlertSensitivity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for AlertSensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertSensitivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("unknown alert sensitivity: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    LessThan,
}

impl Comparison {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        }
    }
}

/// Unit of an evaluation window (`for` duration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Years,
}

impl TimeUnit {
    pub fn suffix(&self) -> char {
        match self {
            Self::Seconds => 's',
            Self::Minutes => 'm',
            Self::Hours => 'h',
            Self::Days => 'd',
            Self::Weeks => 'w',
            Self::Years => 'y',
        }
    }

    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::Seconds),
            'm' => Some(Self::Minutes),
            'h' => Some(Self::Hours),
            'd' => Some(Self::Days),
            'w' => Some(Self::Weeks),
            'y' => Some(Self::Years),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}
