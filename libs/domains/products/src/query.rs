//! Product listing: filter resolution and SQL construction.
//!
//! Every filter becomes a `(fragment, value)` pair in a fixed order. The
//! first fragment is prefixed with `WHERE`, the rest with `AND`. Values are
//! always bound through `$n` placeholders.

use sea_orm::Value;
use std::cmp::Ordering;

use crate::models::{Condition, OrderBy, Product, ProductListQuery, SortBy};

pub(crate) const COLUMNS: &str = "products.id, products.uid, products.user_id, products.name, \
     products.price, products.image_url, products.stock, products.condition, products.tags, \
     products.is_purchasable, products.purchase_count, products.created_at";

/// A validated listing request with the caller resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Restrict to one seller
    pub owner_id: Option<i64>,
    pub tags: Vec<String>,
    pub condition: Option<Condition>,
    pub show_empty_stock: bool,
    /// Exclusive lower bound, `None` when absent or zero
    pub min_price: Option<i64>,
    /// Exclusive upper bound, `None` when absent or zero
    pub max_price: Option<i64>,
    /// Already lowercased
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub order_by: OrderBy,
    /// 0 means unbounded
    pub limit: u64,
    pub offset: u64,
}

impl ListFilter {
    /// `userOnly` only applies to an authenticated caller.
    pub fn from_query(query: ProductListQuery, actor: Option<i64>) -> Self {
        Self {
            owner_id: if query.user_only { actor } else { None },
            tags: query.tags,
            condition: query.condition,
            show_empty_stock: query.show_empty_stock,
            min_price: query.min_price.filter(|p| *p > 0),
            max_price: query.max_price.filter(|p| *p > 0),
            search: query
                .search
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase()),
            sort_by: query.sort_by,
            order_by: query.order_by.unwrap_or_default(),
            limit: query.limit.unwrap_or(0),
            offset: query.offset.unwrap_or(0),
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.limit != 0
    }

    /// Same predicates as [`build_list_query`], for the in-memory store.
    pub fn matches(&self, product: &Product) -> bool {
        if self.owner_id.is_some_and(|id| product.user_id != id) {
            return false;
        }
        if !self.tags.iter().all(|t| product.tags.contains(t)) {
            return false;
        }
        if self.condition.is_some_and(|c| product.condition != c) {
            return false;
        }
        if !self.show_empty_stock && product.stock <= 0 {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price <= min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price >= max) {
            return false;
        }
        if let Some(search) = &self.search {
            if !product.name.to_lowercase().contains(search.as_str()) {
                return false;
            }
        }
        true
    }

    /// Ordering used by [`build_list_query`], for the in-memory store.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self.sort_by {
            Some(SortBy::Price) => a.price.cmp(&b.price),
            Some(SortBy::Date) => a.created_at.cmp(&b.created_at),
            None => Ordering::Equal,
        };
        let primary = match self.order_by {
            OrderBy::Asc => primary,
            OrderBy::Desc => primary.reverse(),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

/// SQL text plus its bound values, in placeholder order.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub values: Vec<Value>,
    /// Rows carry a `total_count` window column
    pub paginated: bool,
}

#[derive(Default)]
struct Params {
    values: Vec<Value>,
}

impl Params {
    fn bind(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }
}

pub fn build_list_query(filter: &ListFilter) -> BuiltQuery {
    let mut params = Params::default();
    let mut predicates = Vec::new();
    let mut join = "";

    if let Some(owner_id) = filter.owner_id {
        join = " JOIN users ON users.id = products.user_id";
        predicates.push(format!("products.user_id = {}", params.bind(owner_id)));
    }

    for tag in &filter.tags {
        predicates.push(format!("{} = ANY(products.tags)", params.bind(tag.clone())));
    }

    if let Some(condition) = filter.condition {
        predicates.push(format!(
            "products.condition = {}",
            params.bind(condition.to_string())
        ));
    }

    if !filter.show_empty_stock {
        predicates.push(format!("products.stock > {}", params.bind(0i64)));
    }

    if let Some(min) = filter.min_price {
        predicates.push(format!("products.price > {}", params.bind(min)));
    }

    if let Some(max) = filter.max_price {
        predicates.push(format!("products.price < {}", params.bind(max)));
    }

    if let Some(search) = &filter.search {
        predicates.push(format!(
            "strpos(lower(products.name), {}) > 0",
            params.bind(search.clone())
        ));
    }

    let paginated = filter.is_paginated();
    let mut sql = format!("SELECT {COLUMNS}");
    if paginated {
        sql.push_str(", COUNT(*) OVER() AS total_count");
    }
    sql.push_str(" FROM products");
    sql.push_str(join);

    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }

    let direction = match filter.order_by {
        OrderBy::Asc => "ASC",
        OrderBy::Desc => "DESC",
    };
    match filter.sort_by {
        Some(SortBy::Price) => {
            sql.push_str(&format!(" ORDER BY products.price {direction}, products.id ASC"))
        }
        Some(SortBy::Date) => sql.push_str(&format!(
            " ORDER BY products.created_at {direction}, products.id ASC"
        )),
        None => sql.push_str(" ORDER BY products.id ASC"),
    }

    if paginated {
        let limit = params.bind(i64::try_from(filter.limit).unwrap_or(i64::MAX));
        let offset = params.bind(i64::try_from(filter.offset).unwrap_or(i64::MAX));
        sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
    }

    BuiltQuery {
        sql,
        values: params.values,
        paginated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn product(id: i64, price: i64, stock: i64) -> Product {
        Product {
            id,
            uid: Uuid::new_v4(),
            user_id: 1,
            name: format!("Vintage Lamp {id}"),
            price,
            image_url: "https://images.example.com/lamp.png".into(),
            stock,
            condition: Condition::Second,
            tags: vec!["home".into(), "decor".into()],
            is_purchasable: true,
            purchase_count: 0,
            created_at: Utc::now() + Duration::seconds(id),
        }
    }

    #[test]
    fn test_default_query_hides_empty_stock() {
        let built = build_list_query(&ListFilter::default());

        assert_eq!(
            built.sql,
            format!("SELECT {COLUMNS} FROM products WHERE products.stock > $1 ORDER BY products.id ASC")
        );
        assert_eq!(built.values, vec![Value::from(0i64)]);
        assert!(!built.paginated);
    }

    #[test]
    fn test_all_filters_bind_in_order() {
        let filter = ListFilter {
            owner_id: Some(7),
            tags: vec!["home".into(), "decor".into()],
            condition: Some(Condition::New),
            show_empty_stock: true,
            min_price: Some(100),
            max_price: Some(500),
            search: Some("lamp".into()),
            sort_by: Some(SortBy::Price),
            order_by: OrderBy::Desc,
            limit: 10,
            offset: 20,
        };

        let built = build_list_query(&filter);

        assert_eq!(
            built.sql,
            format!(
                "SELECT {COLUMNS}, COUNT(*) OVER() AS total_count FROM products \
                 JOIN users ON users.id = products.user_id \
                 WHERE products.user_id = $1 AND $2 = ANY(products.tags) AND $3 = ANY(products.tags) \
                 AND products.condition = $4 AND products.price > $5 AND products.price < $6 \
                 AND strpos(lower(products.name), $7) > 0 \
                 ORDER BY products.price DESC, products.id ASC LIMIT $8 OFFSET $9"
            )
        );
        assert_eq!(
            built.values,
            vec![
                Value::from(7i64),
                Value::from("home".to_string()),
                Value::from("decor".to_string()),
                Value::from("new".to_string()),
                Value::from(100i64),
                Value::from(500i64),
                Value::from("lamp".to_string()),
                Value::from(10i64),
                Value::from(20i64),
            ]
        );
        assert!(built.paginated);
    }

    #[test]
    fn test_date_sort_defaults_to_ascending() {
        let filter = ListFilter {
            sort_by: Some(SortBy::Date),
            show_empty_stock: true,
            ..Default::default()
        };

        let built = build_list_query(&filter);
        assert!(built.sql.ends_with("ORDER BY products.created_at ASC, products.id ASC"));
        assert!(built.values.is_empty());
    }

    #[test]
    fn test_user_only_ignored_for_anonymous_caller() {
        let query = ProductListQuery {
            user_only: true,
            ..Default::default()
        };

        assert_eq!(ListFilter::from_query(query.clone(), None).owner_id, None);
        assert_eq!(ListFilter::from_query(query, Some(3)).owner_id, Some(3));
    }

    #[test]
    fn test_zero_price_bounds_are_absent() {
        let query = ProductListQuery {
            min_price: Some(0),
            max_price: Some(0),
            search: Some("LaMp".into()),
            ..Default::default()
        };

        let filter = ListFilter::from_query(query, None);
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, None);
        assert_eq!(filter.search.as_deref(), Some("lamp"));
    }

    #[test]
    fn test_matches_mirrors_predicates() {
        let filter = ListFilter {
            tags: vec!["home".into()],
            min_price: Some(100),
            max_price: Some(300),
            search: Some("lamp".into()),
            ..Default::default()
        };

        assert!(filter.matches(&product(1, 200, 1)));
        assert!(!filter.matches(&product(2, 100, 1)));
        assert!(!filter.matches(&product(3, 300, 1)));
        assert!(!filter.matches(&product(4, 200, 0)));

        let other_tag = ListFilter {
            tags: vec!["home".into(), "garden".into()],
            ..Default::default()
        };
        assert!(!other_tag.matches(&product(5, 200, 1)));
    }

    #[test]
    fn test_compare_breaks_ties_by_id() {
        let filter = ListFilter {
            sort_by: Some(SortBy::Price),
            order_by: OrderBy::Desc,
            ..Default::default()
        };

        let mut products = vec![product(1, 100, 1), product(2, 300, 1), product(3, 300, 1)];
        products.sort_by(|a, b| filter.compare(a, b));

        let ids: Vec<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, [2, 3, 1]);
    }
}
