use bson::Bson;

use crate::errors::FilterError;

use super::catalog::{CompareToken, REGEX_OPTIONS};
use super::convert::{iso_date, quoted, to_text};
use super::types::{Condition, FieldType, FilterExpression, GroupOperator, Predicate};
use super::validate::validate;

/// Compiles a filter into the query-filter string understood by the document store.
///
/// The whole tree is validated first, so a malformed node anywhere aborts the call without
/// producing partial output.
///
/// # Errors
/// Returns `FilterError::Structural` if the tree violates the leaf/group exclusivity rule.
pub fn compile(filter: &FilterExpression) -> Result<String, FilterError> {
    validate(filter)?;
    let mut out = String::new();
    match filter {
        FilterExpression::Single(condition) => write_condition(&mut out, condition)?,
        FilterExpression::Group { op, conditions } => write_group(&mut out, *op, conditions)?,
    }
    log::debug!("compiled filter: {out}");
    crate::dev6!("{{\"op\":\"compile_filter\",\"length\":{}}}", out.len());
    Ok(out)
}

fn write_condition(out: &mut String, condition: &Condition) -> Result<(), FilterError> {
    match condition {
        Condition::Leaf(p) => {
            write_leaf(out, p);
            Ok(())
        }
        Condition::Group { op, children } => write_group(out, *op, children),
    }
}

fn write_group(out: &mut String, op: GroupOperator, children: &[Condition]) -> Result<(), FilterError> {
    let token = op
        .token()
        .ok_or_else(|| FilterError::structural("group operator NONE cannot be compiled"))?;
    out.push_str("{ ");
    out.push_str(token);
    out.push_str(" : [ ");
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_condition(out, child)?;
    }
    out.push_str(" ] }");
    Ok(())
}

/// Writes `{ "<parameter>" : { <op>: <value> } }`. The parameter name is JSON-escaped, so quotes
/// or backslashes in a field name cannot end the key early.
fn write_leaf(out: &mut String, p: &Predicate) {
    out.push_str("{ ");
    out.push_str(&quoted(&p.parameter));
    out.push_str(" : { ");
    match p.compare.token() {
        CompareToken::Scalar(token) => {
            out.push_str(token);
            out.push_str(": ");
            out.push_str(&literal(p));
        }
        CompareToken::Set(token) => {
            out.push_str(token);
            out.push_str(": ");
            out.push_str(&to_text(&p.value));
        }
        CompareToken::Pattern(shape) => {
            out.push_str("$regex: /");
            out.push_str(&shape.pattern(&to_text(&p.value)));
            out.push_str("/, $options: '");
            out.push_str(REGEX_OPTIONS);
            out.push('\'');
        }
    }
    out.push_str(" } }");
}

/// Typed literal. Numbers, booleans and nulls are embedded bare under `Number` and `DateTime`;
/// dates and object ids become shell constructors; anything else is quoted, whatever the field
/// type says.
fn literal(p: &Predicate) -> String {
    match (p.field_type, &p.value) {
        (_, Bson::ObjectId(oid)) => format!("ObjectId({})", quoted(&oid.to_hex())),
        (FieldType::DateTime | FieldType::Number, Bson::DateTime(at)) => iso_date(at),
        (FieldType::DateTime, Bson::String(s)) => format!("ISODate({})", quoted(s)),
        (
            FieldType::Number | FieldType::DateTime,
            v @ (Bson::Int32(_)
            | Bson::Int64(_)
            | Bson::Double(_)
            | Bson::Decimal128(_)
            | Bson::Boolean(_)
            | Bson::Null
            | Bson::Undefined),
        ) => to_text(v),
        (_, v) => quoted(&to_text(v)),
    }
}
