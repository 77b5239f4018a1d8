//! Tri-state "yes / no / ask later" values

/// An opinion about a boolean setting that may not have been expressed yet.
///
/// `Unknown` is the identity of [`Decision::merge`]: a source that has no
/// opinion never overrides one that does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Decision {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Decision {
    /// Right-biased merge: `later` wins whenever it is not `Unknown`.
    pub fn merge(self, later: Decision) -> Decision {
        match later {
            Decision::Unknown => self,
            concrete => concrete,
        }
    }

    /// The concrete answer, if any
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Decision::Yes => Some(true),
            Decision::No => Some(false),
            Decision::Unknown => None,
        }
    }

    /// Turn the decision into a boolean, calling `ask` only for `Unknown`.
    pub fn resolve<E>(self, ask: impl FnOnce() -> Result<bool, E>) -> Result<bool, E> {
        match self.as_bool() {
            Some(answer) => Ok(answer),
            None => ask(),
        }
    }
}

impl From<bool> for Decision {
    fn from(value: bool) -> Self {
        if value {
            Decision::Yes
        } else {
            Decision::No
        }
    }
}

impl From<Option<bool>> for Decision {
    fn from(value: Option<bool>) -> Self {
        value.map(Decision::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    const ALL: [Decision; 3] = [Decision::Yes, Decision::No, Decision::Unknown];

    #[test]
    fn test_merge_is_right_biased() {
        assert_eq!(Decision::Yes.merge(Decision::No), Decision::No);
        assert_eq!(Decision::No.merge(Decision::Unknown), Decision::No);
        assert_eq!(Decision::Unknown.merge(Decision::Unknown), Decision::Unknown);
        assert_eq!(Decision::Unknown.merge(Decision::Yes), Decision::Yes);
    }

    #[test]
    fn test_unknown_is_identity() {
        for d in ALL {
            assert_eq!(Decision::Unknown.merge(d), d);
            assert_eq!(d.merge(Decision::Unknown), d);
        }
    }

    #[test]
    fn test_merge_is_associative() {
        for a in ALL {
            for b in ALL {
                for c in ALL {
                    assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
                }
            }
        }
    }

    #[test]
    fn test_resolve_only_asks_when_unknown() {
        let mut asked = 0;
        let yes = Decision::Yes.resolve(|| {
            asked += 1;
            Ok::<_, Infallible>(false)
        });
        assert_eq!(yes, Ok(true));
        assert_eq!(asked, 0);

        let answered = Decision::Unknown.resolve(|| {
            asked += 1;
            Ok::<_, Infallible>(true)
        });
        assert_eq!(answered, Ok(true));
        assert_eq!(asked, 1);
    }

    #[test]
    fn test_from_optional_bool() {
        assert_eq!(Decision::from(Some(true)), Decision::Yes);
        assert_eq!(Decision::from(Some(false)), Decision::No);
        assert_eq!(Decision::from(None), Decision::Unknown);
    }
}
