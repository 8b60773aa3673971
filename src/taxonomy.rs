//! Safety-classification tag taxonomy.
//!
//! The catalogue is closed: every tag a reviewer can apply to a turn is a
//! variant of [`SafetyTag`], declared in the order the checklists show them.
//! That declaration order is load-bearing twice over: it is the order tags
//! appear inside each category group, and (because [`SafetyTag`] derives
//! `Ord`) it is the encounter order of tags held in a turn's tag set.
//!
//! Category membership and SM/SX severity are derived from the canonical id
//! string, not stored, so the string rules below are the single source of
//! truth for both the catalogue export and the report formatter.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::ReviewError;

/// `s[xm]<digits>` severity token, e.g. `sx4` in `sx4:_specific_sexual_content`.
static SEVERITY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)s[xm][0-9]+").unwrap());

// ── Tag categories ──────────────────────────────────────────────────

/// Checklist group a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Sm,
    Sx,
    SelfHarm,
    EatingDisorder,
    Violence,
    Other,
}

impl TagCategory {
    /// All categories in display order.
    pub const ALL: &'static [TagCategory] = &[
        TagCategory::Sm,
        TagCategory::Sx,
        TagCategory::SelfHarm,
        TagCategory::EatingDisorder,
        TagCategory::Violence,
        TagCategory::Other,
    ];

    /// Heading shown above the group's checklist.
    pub fn label(self) -> &'static str {
        match self {
            TagCategory::Sm => "SM",
            TagCategory::Sx => "SX",
            TagCategory::SelfHarm => "Self-Harm",
            TagCategory::EatingDisorder => "Eating Disorder",
            TagCategory::Violence => "Violence",
            TagCategory::Other => "Other",
        }
    }

    /// Identifier used in exports.
    pub fn id(self) -> &'static str {
        match self {
            TagCategory::Sm => "sm",
            TagCategory::Sx => "sx",
            TagCategory::SelfHarm => "self_harm",
            TagCategory::EatingDisorder => "eating_disorder",
            TagCategory::Violence => "violence",
            TagCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for TagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Assign a category from a raw tag id. First matching rule wins.
pub fn classify_tag_id(id: &str) -> TagCategory {
    if id.starts_with("sm") {
        TagCategory::Sm
    } else if id.starts_with("sx") {
        TagCategory::Sx
    } else if id.contains("selfharm") {
        TagCategory::SelfHarm
    } else if id.contains("eating_disorder") {
        TagCategory::EatingDisorder
    } else if id.contains("violence") {
        TagCategory::Violence
    } else {
        TagCategory::Other
    }
}

// ── Severity ────────────────────────────────────────────────────────

/// SM/SX family. Declaration order is report order: SX sorts before SM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityClass {
    Sx,
    Sm,
}

impl SeverityClass {
    const ALL: [SeverityClass; 2] = [SeverityClass::Sx, SeverityClass::Sm];

    /// Uppercase prefix used in short forms.
    pub fn prefix(self) -> &'static str {
        match self {
            SeverityClass::Sx => "SX",
            SeverityClass::Sm => "SM",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            SeverityClass::Sx => "sx",
            SeverityClass::Sm => "sm",
        }
    }

    /// Family of a canonical tag id, from its lowercase prefix.
    pub fn of_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| id.starts_with(class.id_prefix()))
    }

    /// Family of a report short form, from its uppercase prefix.
    pub fn of_short_form(form: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| form.starts_with(class.prefix()))
    }
}

/// Sort key for an SM/SX tag: family first, then numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeverityKey {
    pub class: SeverityClass,
    pub level: u32,
}

/// Integer value of the leading digits of `text`, 0 when there are none.
fn leading_level(text: &str) -> u32 {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().unwrap_or(0)
}

/// Extract the severity key of a tag id.
///
/// The family comes from the id prefix; only the level is read from the
/// `s[xm]<digits>` token. Returns `None` for ids outside the SM/SX families.
/// An SM/SX id without a token degrades to level 0 rather than being
/// rejected.
pub fn severity_key(id: &str) -> Option<SeverityKey> {
    let class = SeverityClass::of_id(id)?;
    let level = SEVERITY_TOKEN
        .find(id)
        .map_or(0, |token| leading_level(&token.as_str()[2..]));
    Some(SeverityKey { class, level })
}

/// Severity key of a report short form such as `SX4`.
///
/// `None` for forms outside the SM/SX families, which sort after every
/// SM/SX form.
pub fn short_form_severity(form: &str) -> Option<SeverityKey> {
    let class = SeverityClass::of_short_form(form)?;
    Some(SeverityKey {
        class,
        level: leading_level(&form[class.prefix().len()..]),
    })
}

/// Reduce a tag id to the form used in report text.
///
/// SM/SX ids collapse to their uppercased `S[XM]<digits>` token; every other
/// id passes through unchanged.
pub fn short_form(id: &str) -> String {
    if SeverityClass::of_id(id).is_some() {
        if let Some(token) = SEVERITY_TOKEN.find(id) {
            return token.as_str().to_ascii_uppercase();
        }
    }
    id.to_string()
}

// ── Tags ────────────────────────────────────────────────────────────

/// A safety-classification tag from the closed catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SafetyTag {
    Sm0OtherContent,
    Sm1AdultSexualActivity,
    Sm2SexualizationYoungChildren,
    Sm3SexBetweenMinors,
    Sm4DepictionsOfMinorAbuse,
    Sm5InappropriateAdultMinorContent,
    Sx0NonSexual,
    Sx1MildSensualActivity,
    Sx2EroticImpliedSexualActivity,
    Sx3GenericSexualContent,
    Sx4SpecificSexualContent,
    Sx5GraphicSexualContent,
    Sx6NonConsensualSexualContent,
    PromotesSelfHarm,
    DiscussesSelfHarm,
    DepictionSelfHarm,
    ExaggerationSelfHarm,
    PromotesEatingDisorder,
    DiscussesEatingDisorder,
    DepictionEatingDisorder,
    ViolenceOther,
    InstructionalViolence,
    IncitementOfViolence,
    SexualViolence,
    DepictionsOfViolence,
    HateSpeech,
}

impl SafetyTag {
    /// Every tag in declaration order.
    pub const ALL: &'static [SafetyTag] = &[
        SafetyTag::Sm0OtherContent,
        SafetyTag::Sm1AdultSexualActivity,
        SafetyTag::Sm2SexualizationYoungChildren,
        SafetyTag::Sm3SexBetweenMinors,
        SafetyTag::Sm4DepictionsOfMinorAbuse,
        SafetyTag::Sm5InappropriateAdultMinorContent,
        SafetyTag::Sx0NonSexual,
        SafetyTag::Sx1MildSensualActivity,
        SafetyTag::Sx2EroticImpliedSexualActivity,
        SafetyTag::Sx3GenericSexualContent,
        SafetyTag::Sx4SpecificSexualContent,
        SafetyTag::Sx5GraphicSexualContent,
        SafetyTag::Sx6NonConsensualSexualContent,
        SafetyTag::PromotesSelfHarm,
        SafetyTag::DiscussesSelfHarm,
        SafetyTag::DepictionSelfHarm,
        SafetyTag::ExaggerationSelfHarm,
        SafetyTag::PromotesEatingDisorder,
        SafetyTag::DiscussesEatingDisorder,
        SafetyTag::DepictionEatingDisorder,
        SafetyTag::ViolenceOther,
        SafetyTag::InstructionalViolence,
        SafetyTag::IncitementOfViolence,
        SafetyTag::SexualViolence,
        SafetyTag::DepictionsOfViolence,
        SafetyTag::HateSpeech,
    ];

    /// `(canonical id, display label)`.
    fn entry(self) -> (&'static str, &'static str) {
        match self {
            SafetyTag::Sm0OtherContent => ("sm0:_other_content", "SM0: Other Content"),
            SafetyTag::Sm1AdultSexualActivity => {
                ("sm1:_adult_sexual_activity", "SM1: Adult Sexual Activity")
            }
            SafetyTag::Sm2SexualizationYoungChildren => (
                "sm2:_sexualization_young_children",
                "SM2: Sexualization Young Children",
            ),
            SafetyTag::Sm3SexBetweenMinors => {
                ("sm3:_sex_between_minors", "SM3: Sex Between Minors")
            }
            SafetyTag::Sm4DepictionsOfMinorAbuse => (
                "sm4:_depictions_of_minor_abuse",
                "SM4: Depictions of Minor Abuse",
            ),
            SafetyTag::Sm5InappropriateAdultMinorContent => (
                "sm5:_inappropriate_sexual/romantic_content_between_adults_and_minors",
                "SM5: Inappropriate Sexual/Romantic Content",
            ),
            SafetyTag::Sx0NonSexual => ("sx0:_non-sexual", "SX0: Non-Sexual"),
            SafetyTag::Sx1MildSensualActivity => {
                ("sx1:_mild_sensual_activity", "SX1: Mild Sensual Activity")
            }
            SafetyTag::Sx2EroticImpliedSexualActivity => (
                "sx2:_erotic/implied_sexual_activity",
                "SX2: Erotic/Implied Sexual Activity",
            ),
            SafetyTag::Sx3GenericSexualContent => {
                ("sx3:_generic_sexual_content", "SX3: Generic Sexual Content")
            }
            SafetyTag::Sx4SpecificSexualContent => {
                ("sx4:_specific_sexual_content", "SX4: Specific Sexual Content")
            }
            SafetyTag::Sx5GraphicSexualContent => {
                ("sx5:_graphic_sexual_content", "SX5: Graphic Sexual Content")
            }
            SafetyTag::Sx6NonConsensualSexualContent => (
                "sx6_non-consensual_sexual_content",
                "SX6: Non-Consensual Sexual Content",
            ),
            SafetyTag::PromotesSelfHarm => ("promotes_selfharm", "Promotes Self-Harm"),
            SafetyTag::DiscussesSelfHarm => ("discusses_selfharm", "Discusses Self-Harm"),
            SafetyTag::DepictionSelfHarm => ("depiction_selfharm", "Depiction Self-Harm"),
            SafetyTag::ExaggerationSelfHarm => {
                ("exaggeration_selfharm", "Exaggeration Self-Harm")
            }
            SafetyTag::PromotesEatingDisorder => {
                ("promotes_eating_disorder", "Promotes Eating Disorder")
            }
            SafetyTag::DiscussesEatingDisorder => {
                ("discusses_eating_disorder", "Discusses Eating Disorder")
            }
            SafetyTag::DepictionEatingDisorder => {
                ("depiction_eating_disorder", "Depiction Eating Disorder")
            }
            SafetyTag::ViolenceOther => ("violence_other", "Violence Other"),
            SafetyTag::InstructionalViolence => {
                ("instructional_violence", "Instructional Violence")
            }
            SafetyTag::IncitementOfViolence => {
                ("incitement_of_violence", "Incitement of Violence")
            }
            SafetyTag::SexualViolence => ("sexual_violence", "Sexual Violence"),
            SafetyTag::DepictionsOfViolence => {
                ("depictions_of_violence", "Depictions of Violence")
            }
            SafetyTag::HateSpeech => ("hate_speech", "Hate Speech"),
        }
    }

    /// Canonical id, as used in scripts and exports.
    pub fn id(self) -> &'static str {
        self.entry().0
    }

    /// Checklist label.
    pub fn label(self) -> &'static str {
        self.entry().1
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.id() == id)
    }

    /// Like [`SafetyTag::from_id`], but rejects unknown ids with an error.
    pub fn parse(id: &str) -> Result<Self, ReviewError> {
        Self::from_id(id).ok_or_else(|| ReviewError::UnknownTag(id.to_string()))
    }

    pub fn category(self) -> TagCategory {
        classify_tag_id(self.id())
    }

    /// Severity key for SM/SX tags, `None` for the rest.
    pub fn severity(self) -> Option<SeverityKey> {
        severity_key(self.id())
    }

    pub fn short_form(self) -> String {
        short_form(self.id())
    }
}

impl std::fmt::Display for SafetyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl From<SafetyTag> for &'static str {
    fn from(tag: SafetyTag) -> Self {
        tag.id()
    }
}

impl TryFrom<String> for SafetyTag {
    type Error = ReviewError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::parse(&id)
    }
}

// ── String-keyed lookups ────────────────────────────────────────────

/// Display label for a raw tag id.
pub fn label_of(id: &str) -> Result<&'static str, ReviewError> {
    SafetyTag::parse(id).map(SafetyTag::label)
}

/// Category for a raw tag id.
pub fn category_of(id: &str) -> Result<TagCategory, ReviewError> {
    SafetyTag::parse(id).map(SafetyTag::category)
}

/// Group the catalogue by category, both in display order.
///
/// Every category is present, even one with no tags.
pub fn group_by_category() -> Vec<(TagCategory, Vec<SafetyTag>)> {
    TagCategory::ALL
        .iter()
        .map(|&category| {
            let tags = SafetyTag::ALL
                .iter()
                .copied()
                .filter(|tag| tag.category() == category)
                .collect();
            (category, tags)
        })
        .collect()
}

// ── Catalogue export (for checklist rendering) ──────────────────────

/// Full tag catalogue handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCatalogue {
    pub groups: Vec<TagGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagGroup {
    pub id: String,
    pub label: String,
    pub tags: Vec<TagEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagEntry {
    pub id: String,
    pub label: String,
    /// Form used in report text (e.g. `SX4`).
    pub short_form: String,
}

impl TagCatalogue {
    pub fn build() -> Self {
        let groups = group_by_category()
            .into_iter()
            .map(|(category, tags)| TagGroup {
                id: category.id().to_string(),
                label: category.label().to_string(),
                tags: tags
                    .into_iter()
                    .map(|tag| TagEntry {
                        id: tag.id().to_string(),
                        label: tag.label().to_string(),
                        short_form: tag.short_form(),
                    })
                    .collect(),
            })
            .collect();

        Self { groups }
    }

    /// Total number of tags across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.tags.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
