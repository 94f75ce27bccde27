//! Documentation content for the tagq CLI

use super::CliError;
use crate::fields::FixedField;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Wildcards,
    Fields,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "wildcards" | "wildcard" | "presence" => Some(Self::Wildcards),
            "fields" | "field" | "fixed_fields" => Some(Self::Fields),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"TAGQ DOCUMENTATION

tagq filters a photo collection with boolean expressions over hierarchical
tags and structured fields. Every reference starts with `tag.` followed by a
dotted path; tag names are case-insensitive.

DOCUMENTATION CATEGORIES

  syntax            Tag references, literals, grouping
  operators         Comparison and logical operators, precedence
  wildcards         Presence checks over a tag and its descendants
  fields            Fixed fields and how missing values behave

QUICK REFERENCE

  tag.person.alice              Tag applied
  tag.scene.outdoor*            Tag or any descendant applied
  tag.scene.outdoor.*           Any descendant applied
  tag.datetime.year>=2018       Field comparison
  tag.datetime==None            Field unset
  !  &&  ||  ( )                Logic and grouping

Run 'tagq doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<String, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC.to_string()),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC.to_string()),
        Some(DocCategory::Wildcards) => Ok(WILDCARDS_DOC.to_string()),
        Some(DocCategory::Fields) => Ok(fields_doc()),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Tag References and Literals

TAG REFERENCES
  tag.<name>[.<name>...]
    A dotted path into the tag tree, or the name of a fixed field.
    Names may contain ASCII letters, digits and underscores. Case is ignored.

    Examples:
      tag.person.alice
      tag.Event.Birthday.Alice      same as tag.event.birthday.alice

LITERALS
  "text" or 'text'    String, no escape sequences
  2018, -4            Integer
  40.71               Float (any number with a '.')
  true, false         Boolean
  None                No value

GROUPING
  ( <expr> )
    Parentheses group any sub-expression, including negated groups:

      !(tag.person.alice && tag.scene.indoor)
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparison and Logic

COMPARISON OPERATORS
  ==  !=  >  >=  <  <=

  Comparisons apply to fixed fields only; tags are presence-only.

  Examples:
    tag.datetime.year>=2018
    tag.location.city=="Springfield"
    tag.favorite==true

  Constraints:
    - Booleans only support == and !=
    - None only supports == and !=
    - The literal must match the field type

LOGICAL OPERATORS
  !     NOT (prefix, may be repeated)
  &&    AND (short-circuit)
  ||    OR (short-circuit)

  Precedence, tightest first: !  &&  ||

    tag.a || tag.b && tag.c       means   tag.a || (tag.b && tag.c)
    !tag.a && tag.b               means   (!tag.a) && tag.b
"#;

const WILDCARDS_DOC: &str = r#"WILDCARDS - Presence Checks

EXACT
  tag.scene.outdoor
    The photo carries exactly this tag. Category tags are never applied
    directly, so an exact check on a category matches nothing.

INCLUSIVE
  tag.scene.outdoor*
    The photo carries the tag or any tag below it.

CHILDREN ONLY
  tag.scene.outdoor.*
    The photo carries some tag below it, not counting the tag itself.

  Example tree:  scene -> outdoor -> {lake, hike}
    Photo tagged scene.outdoor.lake:
      tag.scene.outdoor      no
      tag.scene.outdoor*     yes
      tag.scene.outdoor.*    yes
"#;

fn fields_doc() -> String {
    let mut doc = String::from(
        "FIELDS - Fixed Photo Fields\n\n\
         Fixed fields take priority over tags with the same path.\n\n",
    );
    for field in FixedField::ALL {
        doc.push_str(&format!("  tag.{:<26}{}\n", field.path(), field.kind()));
    }
    doc.push_str(
        "\nPRESENCE\n  tag.favorite              boolean field is true\n  \
         tag.location.city         field is set\n\n\
         MISSING VALUES\n  A missing field equals only None:\n    \
         tag.datetime.year==None    matches photos without a date\n    \
         tag.datetime.year!=2020    matches photos without a date too\n    \
         tag.datetime.year>=2018    never matches photos without a date\n",
    );
    doc
}
