use bson::doc;
use docfilter::query::{
    CompareOperator, Condition, FilterExpression, MATCH_ALL, MongoDialect, QueryDialect, SortField,
    UpdateSpec,
};

#[test]
fn update_repeated_field_keeps_last_value() {
    let u = UpdateSpec::builder()
        .set("tier", "silver")
        .set("score", 3)
        .set("tier", "gold")
        .build()
        .unwrap();
    let c = MongoDialect.compile_update(&u).unwrap();
    assert_eq!(c.filter, MATCH_ALL);
    assert_eq!(c.update, doc! {"$set": {"tier": "gold", "score": 3}});
}

#[test]
fn update_by_filter_compiles_target() {
    let f = FilterExpression::new(Condition::text("email", CompareOperator::EndWith, "@example.com"));
    let u = UpdateSpec::builder().filter(f).set("verified", true).build().unwrap();
    let c = MongoDialect.compile_update(&u).unwrap();
    assert_eq!(c.filter, r#"{ "email" : { $regex: /@example.com$/, $options: 'im' } }"#);
    assert_eq!(c.update, doc! {"$set": {"verified": true}});
}

#[test]
fn malformed_update_target_fails() {
    let f = FilterExpression::new(Condition::or(vec![]));
    let u = UpdateSpec::by_filter(f, vec![docfilter::query::FieldValue::new("x", 1)]).unwrap();
    assert!(MongoDialect.compile_update(&u).is_err());
}

#[test]
fn sort_through_dialect() {
    let d = MongoDialect.compile_sort(&[SortField::asc("name"), SortField::desc("created")]);
    assert_eq!(d, Some(doc! {"name": 1, "created": -1}));
    assert_eq!(MongoDialect.compile_sort(&[]), None);
}
