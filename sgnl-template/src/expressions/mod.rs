mod path;

pub use path::{parse_path_expr, PathExpr, PathExprError, PathSegment};
