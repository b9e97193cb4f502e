//! Object identifiers and their dotted text form.
//!
//! Arcs live inline in a `SmallVec<[u32; 16]>`; most pass_persist OIDs fit.

use crate::error::{Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Upper bound on the arc count of any OID.
///
/// RFC 2578 section 3.5 limits a value to 128 sub-identifiers.
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
///
/// Up to 16 arcs are held without a heap allocation.
///
/// `Ord` compares arc by arc as unsigned integers; an OID sorts before any
/// longer OID it is a prefix of. This is the MIB walk order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Build an OID from any iterator of arcs.
    ///
    /// No validation is performed. Use [`validate_all()`](Self::validate_all)
    /// when the arcs come from an untrusted source.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_passpersist::oid::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Build an OID by copying a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.4.1.8072.1.3.1").
    ///
    /// A single leading dot is tolerated, as net-snmp sends OIDs in the
    /// `.1.3.6.1...` form. The empty string (or a lone `.`) parses to the
    /// empty OID.
    ///
    /// # Validation
    ///
    /// Unlike [`new()`](Self::new), parsing enforces every OID invariant:
    ///
    /// - each arc is a base-10 integer in `0..=u32::MAX`
    /// - at most [`MAX_OID_LEN`] arcs
    /// - arc1 is 0, 1, or 2, and arc2 is <= 39 when arc1 < 2 (X.690 Section 8.19.4)
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_passpersist::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.4.1.8072.1.3.1").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.4.1.8072.1.3.1");
    ///
    /// assert!(Oid::parse("1.3.abc").is_err());
    /// assert!(Oid::parse("3.0").is_err());
    /// assert!(Oid::parse("1.40").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let body = s.strip_prefix('.').unwrap_or(s);
        if body.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();

        for part in body.split('.') {
            // u32::from_str accepts a leading '+', which is not dotted-decimal
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s));
            }

            let arc: u32 = part
                .parse()
                .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;

            arcs.push(arc);

            if arcs.len() > MAX_OID_LEN {
                return Err(Error::invalid_oid_with_input(
                    OidErrorKind::TooManyArcs {
                        count: body.split('.').count(),
                        max: MAX_OID_LEN,
                    },
                    s,
                ));
            }
        }

        let oid = Self { arcs };
        oid.validate().map_err(|e| match e.oid_kind() {
            Some(kind) => Error::invalid_oid_with_input(kind, s),
            None => e,
        })?;
        Ok(oid)
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// True for the zero-arc OID.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Prefix test: is `other` a leading run of this OID's arcs?
    ///
    /// Every OID starts with itself and with the empty OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Check if `other` lies in the subtree rooted at this OID.
    ///
    /// This is the prefix test seen from the root's side: `base.contains(&x)`
    /// is `x.starts_with(&base)`. A subtree contains its own root.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_passpersist::oid;
    ///
    /// let base = oid!(1, 3, 6, 1, 4, 1, 8072, 1, 3, 1);
    /// assert!(base.contains(&oid!(1, 3, 6, 1, 4, 1, 8072, 1, 3, 1, 0)));
    /// assert!(base.contains(&base));
    /// assert!(!base.contains(&oid!(1, 3, 6, 1, 4, 1, 8072, 1, 3, 2)));
    /// ```
    pub fn contains(&self, other: &Oid) -> bool {
        other.starts_with(self)
    }

    /// Return a new OID with `suffix` appended.
    ///
    /// The receiver is left untouched. The suffix is not checked against the
    /// first-arc constraints (those only apply to the start of an OID); the
    /// length limit is checked by [`validate_length()`](Self::validate_length).
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_passpersist::oid;
    ///
    /// let base = oid!(1, 3, 6, 1, 4, 1, 8072, 1, 3, 1);
    /// let leaf = base.append(&[2, 0]);
    /// assert_eq!(leaf.to_string(), "1.3.6.1.4.1.8072.1.3.1.2.0");
    /// assert_eq!(base.len(), 10);
    /// ```
    pub fn append(&self, suffix: &[u32]) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.extend_from_slice(suffix);
        Oid { arcs }
    }

    /// Create a child OID by appending a single arc.
    pub fn child(&self, arc: u32) -> Oid {
        self.append(&[arc])
    }

    /// Check the first two arcs against X.690 section 8.19.4: the first arc
    /// is 0, 1 or 2, and under 0 or 1 the second arc is at most 39.
    pub fn validate(&self) -> Result<()> {
        let Some(&arc1) = self.arcs.first() else {
            return Ok(());
        };

        if arc1 > 2 {
            return Err(Error::invalid_oid(OidErrorKind::InvalidFirstArc(arc1)));
        }

        if let Some(&arc2) = self.arcs.get(1)
            && arc1 < 2
            && arc2 >= 40
        {
            return Err(Error::invalid_oid(OidErrorKind::InvalidSecondArc {
                first: arc1,
                second: arc2,
            }));
        }

        Ok(())
    }

    /// Reject OIDs longer than [`MAX_OID_LEN`].
    pub fn validate_length(&self) -> Result<()> {
        if self.arcs.len() > MAX_OID_LEN {
            return Err(Error::invalid_oid(OidErrorKind::TooManyArcs {
                count: self.arcs.len(),
                max: MAX_OID_LEN,
            }));
        }
        Ok(())
    }

    /// [`validate`](Self::validate) plus [`validate_length`](Self::validate_length).
    pub fn validate_all(&self) -> Result<()> {
        self.validate()?;
        self.validate_length()
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

impl serde::Serialize for Oid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Build an [`Oid`] from literal arcs.
///
/// # Examples
///
/// ```
/// use snmp_passpersist::oid;
///
/// let base = oid!(1, 3, 6, 1, 4, 1, 8072, 1, 3, 1);
/// assert_eq!(base.to_string(), "1.3.6.1.4.1.8072.1.3.1");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_parse_leading_dot() {
        let oid = Oid::parse(".1.3.6.1.4.1.8072").unwrap();
        assert_eq!(oid, oid!(1, 3, 6, 1, 4, 1, 8072));
    }

    #[test]
    fn test_parse_empty() {
        assert!(Oid::parse("").unwrap().is_empty());
        assert!(Oid::parse(".").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_segments() {
        for input in ["1.3.abc.1", "1..3", "1.3.", "..1.3", "1.3.-6", "1.+3", "1. 3"] {
            let err = Oid::parse(input).unwrap_err();
            assert_eq!(err.oid_kind(), Some(OidErrorKind::InvalidArc), "{input}");
        }
    }

    #[test]
    fn test_parse_arc_range() {
        let oid = Oid::parse("1.3.4294967295").unwrap();
        assert_eq!(oid.arcs()[2], u32::MAX);
        assert!(Oid::parse("1.3.4294967296").is_err());
    }

    #[test]
    fn test_parse_enforces_first_arcs() {
        assert_eq!(
            Oid::parse("3.1").unwrap_err().oid_kind(),
            Some(OidErrorKind::InvalidFirstArc(3))
        );
        assert_eq!(
            Oid::parse("0.40").unwrap_err().oid_kind(),
            Some(OidErrorKind::InvalidSecondArc {
                first: 0,
                second: 40
            })
        );
        assert!(Oid::parse("1.39").is_ok());
        assert!(Oid::parse("2.999.3").is_ok());
    }

    #[test]
    fn test_parse_enforces_length() {
        let at_limit = vec!["1"; MAX_OID_LEN].join(".");
        assert_eq!(Oid::parse(&at_limit).unwrap().len(), MAX_OID_LEN);

        let over = vec!["1"; MAX_OID_LEN + 1].join(".");
        assert_eq!(
            Oid::parse(&over).unwrap_err().oid_kind(),
            Some(OidErrorKind::TooManyArcs {
                count: MAX_OID_LEN + 1,
                max: MAX_OID_LEN
            })
        );
    }

    #[test]
    fn test_display() {
        let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
        assert_eq!(Oid::empty().to_string(), "");
    }

    #[test]
    fn test_contains() {
        let base = oid!(1, 3, 6, 1, 4, 1);
        assert!(base.contains(&oid!(1, 3, 6, 1, 4, 1, 8072)));
        assert!(base.contains(&base));
        assert!(!base.contains(&oid!(1, 3, 6, 1, 4)));
        assert!(!base.contains(&oid!(1, 3, 6, 1, 5, 1)));
        assert!(Oid::empty().contains(&base));
    }

    #[test]
    fn test_append_is_pure() {
        let base = oid!(1, 3, 6);
        let longer = base.append(&[1, 4]);
        assert_eq!(longer, oid!(1, 3, 6, 1, 4));
        assert_eq!(base, oid!(1, 3, 6));
        // Suffix arcs are not subject to the first-arc rule
        assert_eq!(base.append(&[99, 1000]).arcs(), &[1, 3, 6, 99, 1000]);
    }

    #[test]
    fn test_ordering() {
        assert_eq!(oid!(1, 3, 6).cmp(&oid!(1, 3, 6)), Ordering::Equal);
        assert_eq!(oid!(1, 3, 6).cmp(&oid!(1, 3, 6, 1)), Ordering::Less);
        assert_eq!(oid!(1, 3, 7).cmp(&oid!(1, 3, 6, 1)), Ordering::Greater);
        // Numeric, not textual: 9 < 10
        assert!(oid!(1, 3, 9) < oid!(1, 3, 10));
    }

    #[test]
    fn test_sort_is_walk_order() {
        let mut oids = vec![
            oid!(1, 3, 6, 1, 10),
            oid!(1, 3, 6, 1, 2, 1),
            oid!(1, 3, 6, 1, 2),
            oid!(1, 3, 6, 1, 9, 0),
        ];
        oids.sort();
        assert_eq!(
            oids,
            vec![
                oid!(1, 3, 6, 1, 2),
                oid!(1, 3, 6, 1, 2, 1),
                oid!(1, 3, 6, 1, 9, 0),
                oid!(1, 3, 6, 1, 10),
            ]
        );
    }

    #[test]
    fn test_validate_all() {
        assert!(oid!(1, 3, 6, 1).validate_all().is_ok());
        assert!(Oid::from_slice(&[3, 0]).validate_all().is_err());
        let arcs: Vec<u32> = (0..(MAX_OID_LEN + 1) as u32).collect();
        assert!(Oid::new(arcs).validate_all().is_err());
    }

    #[test]
    fn test_oid_fromstr_roundtrip() {
        let original = oid!(1, 3, 6, 1, 4, 1, 9, 9, 42);
        let parsed: Oid = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
