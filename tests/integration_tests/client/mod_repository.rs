use crate::integration_tests::_support::{Call, RecordingDriver, User};
use bson::doc;
use docfilter::query::{
    CompareOperator, Condition, FieldValue, FilterExpression, GroupOperator, MATCH_ALL, SortField,
    UpdateSpec,
};
use docfilter::config::ClientConfig;
use docfilter::{FilterError, FindOptions, Repository};

fn repo(driver: RecordingDriver) -> Repository<RecordingDriver, User> {
    Repository::new(driver)
}

fn users() -> Vec<User> {
    vec![User::new("1", "alice"), User::new("2", "bob"), User::new("3", "carol")]
}

fn adults() -> FilterExpression {
    FilterExpression::new(Condition::number("age", CompareOperator::GreaterThanEqual, 18))
}

#[test]
fn get_all_filtered_passes_compiled_filter() {
    let repo = repo(RecordingDriver::with_rows(users()));
    let found = repo.get_all_filtered(&adults()).unwrap();
    assert_eq!(found.len(), 3);
    assert_eq!(
        repo.driver().last(),
        Some(Call::Find {
            filter: r#"{ "age" : { $gte: 18 } }"#.into(),
            opts: FindOptions::default(),
        })
    );
}

#[test]
fn get_all_uses_match_all() {
    let repo = repo(RecordingDriver::with_rows(users()));
    assert_eq!(repo.get_all().unwrap().len(), 3);
    match repo.driver().last() {
        Some(Call::Find { filter, .. }) => assert_eq!(filter, MATCH_ALL),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn sorted_find_carries_sort_clause() {
    let repo = repo(RecordingDriver::with_rows(users()));
    repo.get_all_sorted(&adults(), &[SortField::desc("age"), SortField::asc("name")]).unwrap();
    match repo.driver().last() {
        Some(Call::Find { opts, .. }) => {
            assert_eq!(opts.sort, Some(doc! {"age": -1, "name": 1}));
            assert_eq!(opts.skip, None);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn single_sort_with_blank_name_is_dropped() {
    let repo = repo(RecordingDriver::with_rows(users()));
    repo.get_all_sorted_by(&adults(), Some(&SortField::asc(""))).unwrap();
    match repo.driver().last() {
        Some(Call::Find { opts, .. }) => assert_eq!(opts.sort, None),
        other => panic!("unexpected: {other:?}"),
    }
    repo.get_all_sorted_by(&adults(), Some(&SortField::desc("name"))).unwrap();
    match repo.driver().last() {
        Some(Call::Find { opts, .. }) => assert_eq!(opts.sort, Some(doc! {"name": -1})),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn page_data_skips_and_limits() {
    let repo = repo(RecordingDriver::with_rows(users()));
    let page = repo.get_page_data(2, 2, &adults(), &[]).unwrap();
    assert_eq!(page, vec![User::new("3", "carol")]);
    match repo.driver().last() {
        Some(Call::Find { opts, .. }) => {
            assert_eq!(opts.skip, Some(2));
            assert_eq!(opts.limit, Some(2));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn by_id_lookups_use_object_id_filter() {
    let repo = repo(RecordingDriver::with_rows(users()));
    let id = "65a1b2c3d4e5f60718293a4b";
    assert!(repo.get_by_id(id).unwrap().is_some());
    assert!(repo.is_exist_by_id(id).unwrap());
    let expected = format!(r#"{{ "_id" : {{ $eq: ObjectId("{id}") }} }}"#);
    assert_eq!(repo.driver().last(), Some(Call::Count(expected.clone())));
    match &repo.driver().calls()[0] {
        Call::Find { filter, opts } => {
            assert_eq!(filter, &expected);
            assert_eq!(opts.limit, Some(1));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn exists_and_count() {
    let empty = repo(RecordingDriver::default());
    assert!(!empty.is_exist(&adults()).unwrap());
    let repo = repo(RecordingDriver::with_rows(users()));
    assert_eq!(repo.get_count(&adults()).unwrap(), 3);
    assert!(repo.is_exist(&adults()).unwrap());
}

#[test]
fn entity_writes_pass_through() {
    let repo = repo(RecordingDriver::default());
    let u = User::new("9", "zed");
    assert_eq!(repo.insert(u.clone()).unwrap(), u);
    assert_eq!(repo.update(u.clone()).unwrap(), u);
    assert_eq!(repo.delete_entity(&u).unwrap(), 1);
    assert_eq!(repo.delete_by_id("10").unwrap(), 1);
    assert_eq!(
        repo.driver().calls(),
        vec![
            Call::InsertOne("9".into()),
            Call::ReplaceOne("9".into()),
            Call::DeleteOne("9".into()),
            Call::DeleteOne("10".into()),
        ]
    );
}

#[test]
fn delete_by_filter_compiles_group() {
    let repo = repo(RecordingDriver::default());
    let f = FilterExpression::group(
        GroupOperator::Or,
        vec![
            Condition::text("status", CompareOperator::Equal, "archived"),
            Condition::text("name", CompareOperator::BeginWith, "tmp"),
        ],
    );
    repo.delete(&f).unwrap();
    assert_eq!(
        repo.driver().last(),
        Some(Call::DeleteMany(
            r#"{ $or : [ { "status" : { $eq: "archived" } },{ "name" : { $regex: /^tmp/, $options: 'im' } } ] }"#
                .into()
        ))
    );
}

#[test]
fn update_set_sends_filter_and_set_document() {
    let repo = repo(RecordingDriver::with_rows(users()));
    let spec = UpdateSpec::by_filter(
        adults(),
        vec![FieldValue::new("verified", true), FieldValue::new("tier", "gold")],
    )
    .unwrap();
    assert_eq!(repo.update_set(&spec).unwrap(), 3);
    assert_eq!(
        repo.driver().last(),
        Some(Call::UpdateMany {
            filter: r#"{ "age" : { $gte: 18 } }"#.into(),
            update: doc! {"$set": {"verified": true, "tier": "gold"}},
        })
    );
}

#[test]
fn malformed_filter_never_reaches_driver() {
    let repo = repo(RecordingDriver::with_rows(users()));
    let bad = FilterExpression::group(GroupOperator::And, vec![]);
    assert!(matches!(repo.get_all_filtered(&bad), Err(FilterError::Structural(_))));
    assert!(matches!(repo.delete(&bad), Err(FilterError::Structural(_))));
    assert!(repo.driver().calls().is_empty());
}

#[test]
fn driver_errors_propagate() {
    let repo = repo(RecordingDriver::failing());
    assert!(matches!(repo.get_count(&adults()), Err(FilterError::Driver(_))));
}

#[test]
fn zero_page_size_uses_configured_default() {
    let rows = (1..=7).map(|i| User::new(&i.to_string(), "u")).collect();
    let cfg = ClientConfig::from_toml_str("default_page_size = 3\n").unwrap();
    let repo: Repository<RecordingDriver, User> =
        Repository::from_config(RecordingDriver::with_rows(rows), &cfg);
    assert_eq!(repo.default_page_size(), Some(3));
    let page = repo.get_page_data(2, 0, &adults(), &[]).unwrap();
    assert_eq!(page, vec![User::new("4", "u"), User::new("5", "u"), User::new("6", "u")]);
    match repo.driver().last() {
        Some(Call::Find { opts, .. }) => {
            assert_eq!(opts.skip, Some(3));
            assert_eq!(opts.limit, Some(3));
        }
        other => panic!("unexpected: {other:?}"),
    }
    repo.get_page_data(1, 5, &adults(), &[]).unwrap();
    match repo.driver().last() {
        Some(Call::Find { opts, .. }) => assert_eq!(opts.limit, Some(5)),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn zero_page_size_without_default_reads_everything() {
    let repo = repo(RecordingDriver::with_rows(users()));
    assert_eq!(repo.default_page_size(), None);
    assert_eq!(repo.get_page_data(2, 0, &adults(), &[]).unwrap().len(), 3);
    match repo.driver().last() {
        Some(Call::Find { opts, .. }) => {
            assert_eq!(opts.skip, None);
            assert_eq!(opts.limit, None);
        }
        other => panic!("unexpected: {other:?}"),
    }
}
