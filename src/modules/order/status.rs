use serde::{Deserialize, Serialize};
use sqlx::{
    error::BoxDynError,
    postgres::{PgTypeInfo, PgValueRef},
    Postgres,
};
use std::{fmt, str::FromStr};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// The single forward step of the kitchen flow.
    fn successor(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served | OrderStatus::Cancelled => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("'{}' is not a valid order status", s))
    }
}

impl sqlx::Type<Postgres> for OrderStatus {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for OrderStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&'r str as sqlx::Decode<'r, Postgres>>::decode(value)?;
        raw.parse().map_err(|err: String| err.into())
    }
}

/// How status updates from staff are checked against the current status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// pending → confirmed → preparing → ready → served, and cancelled from
    /// any non-terminal status.
    #[default]
    Strict,
    /// Any status may follow any other.
    Permissive,
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(StatusPolicy::Strict),
            "permissive" => Ok(StatusPolicy::Permissive),
            _ => Err(format!("'{}' is not a valid status policy", s)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Changed,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TransitionError {
    Terminal(OrderStatus),
    NotAllowed { from: OrderStatus, to: OrderStatus },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::Terminal(status) => {
                write!(f, "Order is already {} and can no longer change", status)
            }
            TransitionError::NotAllowed { from, to } => {
                write!(f, "Cannot change order status from {} to {}", from, to)
            }
        }
    }
}

impl StatusPolicy {
    pub fn check(&self, from: OrderStatus, to: OrderStatus) -> Result<Transition, TransitionError> {
        if from == to {
            return Ok(Transition::Unchanged);
        }

        if *self == StatusPolicy::Permissive {
            return Ok(Transition::Changed);
        }

        if from.is_terminal() {
            return Err(TransitionError::Terminal(from));
        }

        if to == OrderStatus::Cancelled || from.successor() == Some(to) {
            return Ok(Transition::Changed);
        }

        Err(TransitionError::NotAllowed { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exactly_the_six_lowercase_values() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("PENDING".parse::<OrderStatus>().is_err());
        assert!("delivered".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(OrderStatus::Preparing).unwrap(),
            serde_json::json!("preparing")
        );
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("strict".parse::<StatusPolicy>(), Ok(StatusPolicy::Strict));
        assert_eq!(" Permissive ".parse::<StatusPolicy>(), Ok(StatusPolicy::Permissive));
        assert!("lenient".parse::<StatusPolicy>().is_err());
        assert_eq!(StatusPolicy::default(), StatusPolicy::Strict);
    }

    #[test]
    fn strict_walks_the_kitchen_flow_forward() {
        let policy = StatusPolicy::Strict;
        let flow = [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Served,
        ];
        for pair in flow.windows(2) {
            assert_eq!(policy.check(pair[0], pair[1]), Ok(Transition::Changed));
        }
    }

    #[test]
    fn strict_rejects_skips_and_backwards_moves() {
        let policy = StatusPolicy::Strict;
        assert_eq!(
            policy.check(OrderStatus::Pending, OrderStatus::Ready),
            Err(TransitionError::NotAllowed {
                from: OrderStatus::Pending,
                to: OrderStatus::Ready
            })
        );
        assert!(policy
            .check(OrderStatus::Preparing, OrderStatus::Confirmed)
            .is_err());
    }

    #[test]
    fn strict_allows_cancel_until_terminal() {
        let policy = StatusPolicy::Strict;
        for from in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ] {
            assert_eq!(
                policy.check(from, OrderStatus::Cancelled),
                Ok(Transition::Changed)
            );
        }
        assert_eq!(
            policy.check(OrderStatus::Served, OrderStatus::Cancelled),
            Err(TransitionError::Terminal(OrderStatus::Served))
        );
        assert_eq!(
            policy.check(OrderStatus::Cancelled, OrderStatus::Pending),
            Err(TransitionError::Terminal(OrderStatus::Cancelled))
        );
    }

    #[test]
    fn same_status_is_a_no_op_under_both_policies() {
        for policy in [StatusPolicy::Strict, StatusPolicy::Permissive] {
            for status in OrderStatus::ALL {
                assert_eq!(policy.check(status, status), Ok(Transition::Unchanged));
            }
        }
    }

    #[test]
    fn permissive_allows_anything() {
        let policy = StatusPolicy::Permissive;
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                assert!(policy.check(from, to).is_ok());
            }
        }
    }
}
