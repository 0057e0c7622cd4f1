//! Clause model: the closed set of clause kinds, their typed options and
//! their wire format.

pub mod boolean;
pub mod clause;
pub mod function_score;
pub mod geo;
pub mod highlight;
pub mod nested;
pub mod options;
pub mod range;
pub mod script;
pub mod sort;

pub use self::boolean::{BoolQuery, BooleanClause, Occur};
pub use self::clause::Clause;
pub use self::function_score::{
    BoostMode, DecayKind, DecayParams, FieldValueModifier, FilteredFunction, FunctionScoreMode,
    FunctionScoreOptions, FunctionScoreQuery, ScoreFunction,
};
pub use self::geo::{
    DistanceType, GeoBoundingBox, GeoOptions, GeoPoint, GeoShape, GeoShapeType, SpatialRelation,
};
pub use self::highlight::{Highlight, HighlightOptions};
pub use self::nested::{NestedQuery, ScoreMode};
pub use self::options::{
    BoostOptions, CommonTermsOptions, Fuzziness, FuzzyOptions, MatchOptions, MultiMatchOptions,
    MultiMatchType, Operator, QueryStringOptions, RegexpOptions, TermOptions,
};
pub use self::range::{Bound, RangeBounds};
pub use self::script::Script;
pub use self::sort::{FieldSort, SortOptions, SortOrder};
