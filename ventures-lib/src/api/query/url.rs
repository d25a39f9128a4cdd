//! Query string generation.

use crate::api::query::Direction;
use crate::api::query::Filter;
use crate::api::query::OrderBy;
use crate::api::query::Query;
use crate::model::Value;

/// Converts a `Filter` to a `(column, operator.operand)` query parameter.
pub fn filter_to_param(filter: &Filter) -> (String, String) {
    let (op, operand) = match filter {
        Filter::Eq(_, value) => ("eq", value_to_operand(value)),
        Filter::Neq(_, value) => ("neq", value_to_operand(value)),
        Filter::Gt(_, value) => ("gt", value_to_operand(value)),
        Filter::Gte(_, value) => ("gte", value_to_operand(value)),
        Filter::Lt(_, value) => ("lt", value_to_operand(value)),
        Filter::Lte(_, value) => ("lte", value_to_operand(value)),
        Filter::In(_, values) => {
            let items: Vec<_> = values.iter().map(list_item).collect();
            ("in", format!("({})", items.join(",")))
        }
        Filter::IsNull(_) => ("is", "null".to_string()),
        Filter::IsNotNull(_) => ("not.is", "null".to_string()),
    };
    (filter.field().to_string(), format!("{}.{}", op, operand))
}

/// Converts a `Value` to a filter operand.
pub fn value_to_operand(value: &Value) -> String {
    value.to_param()
}

/// Quotes list members that would otherwise be split or misread.
fn list_item(value: &Value) -> String {
    let raw = value.to_param();
    if raw.contains([',', '(', ')', '"']) {
        format!("\"{}\"", raw.replace('"', "\\\""))
    } else {
        raw
    }
}

/// Converts an `OrderBy` to an `order` parameter value.
pub fn order_to_param(order: &OrderBy) -> String {
    order
        .fields()
        .iter()
        .map(|(field, direction)| {
            let dir = match direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            format!("{}.{}", field, dir)
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Builds the full, percent-encoded query string for a query.
pub fn query_string(query: &Query) -> String {
    let mut params = vec![("select".to_string(), query.projection().to_string())];

    for filter in query.filters() {
        params.push(filter_to_param(filter));
    }

    if let Some(order) = query.order() {
        params.push(("order".to_string(), order_to_param(order)));
    }

    if let Some(limit) = query.limit() {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the query string that targets rows for update or delete.
pub fn filters_string(filters: &[Filter]) -> String {
    filters
        .iter()
        .map(filter_to_param)
        .map(|(key, value)| format!("{}={}", urlencoding::encode(&key), urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_filters() {
        assert_eq!(
            filter_to_param(&Filter::eq("status", "new")),
            ("status".to_string(), "eq.new".to_string())
        );
        assert_eq!(
            filter_to_param(&Filter::gte("capacity", 100i64)),
            ("capacity".to_string(), "gte.100".to_string())
        );
        assert_eq!(
            filter_to_param(&Filter::is_not_null("event_id")),
            ("event_id".to_string(), "not.is.null".to_string())
        );
    }

    #[test]
    fn test_in_filter_quotes_reserved_characters() {
        let (_, value) = filter_to_param(&Filter::is_in("company", ["Acme, Inc", "Globex"]));
        assert_eq!(value, "in.(\"Acme, Inc\",Globex)");
    }

    #[test]
    fn test_order_by() {
        let order = OrderBy::desc("created_at").then_asc("company");
        assert_eq!(order_to_param(&order), "created_at.desc,company.asc");
    }

    #[test]
    fn test_query_string() {
        let query = Query::from("vendor_inquiries")
            .select("id,company,status")
            .filter(Filter::eq("status", "new"))
            .order_by(OrderBy::desc("created_at"))
            .top(50);

        assert_eq!(
            query_string(&query),
            "select=id%2Ccompany%2Cstatus&status=eq.new&order=created_at.desc&limit=50"
        );
    }

    #[test]
    fn test_query_string_defaults_to_all_columns() {
        let query = Query::from("events");
        assert_eq!(query_string(&query), "select=%2A");
    }
}
