//! End-to-end statement compilation for a typed model.

use jaorm::{
    Compiler, CompilerConfig, Cond, ListOptions, Model, OrmError, Resource, ResourceIdentifier,
    Updater, Value, fields,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Company {
    name: String,
    employee_count: u32,
    address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Address {
    city: String,
    street: String,
}

fn withme_today() -> Model {
    let company = Company {
        name: "WithmeToday".into(),
        employee_count: 12,
        address: Address {
            city: "Seoul".into(),
            street: "Teheran-ro".into(),
        },
    };
    Model::from_serialize("company", &company)
        .unwrap()
        .with_id("some-id")
}

#[test]
fn insert_typed_model() {
    let sql = jaorm::insert(&withme_today()).unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO `companies` (`id`, `name`, `employee_count`, `address`) VALUES ('some-id', 'WithmeToday', 12, '{\"city\":\"Seoul\",\"street\":\"Teheran-ro\"}');"#
    );
}

#[test]
fn select_and_delete_by_identifier() {
    let rid = ResourceIdentifier::new("company", "some-id");
    assert_eq!(
        jaorm::select(&rid).unwrap(),
        "SELECT * FROM `companies` WHERE `id` = 'some-id' LIMIT 1;"
    );
    assert_eq!(
        jaorm::delete(&rid).unwrap(),
        "DELETE FROM `companies` WHERE `id` = 'some-id';"
    );
}

#[test]
fn search_with_composed_condition() {
    let cond = Cond::field("name")
        .equals("WithmeToday")
        .or(Cond::field("name").equals("AnotherCompany"))
        .and(Cond::field("address").json_contains(fields! { "city" => "Seoul" }));
    assert_eq!(
        jaorm::search("company", &cond).unwrap(),
        r#"SELECT * FROM `companies` WHERE `name` = 'WithmeToday' OR `name` = 'AnotherCompany' AND JSON_CONTAINS(`address`, '{\"city\":\"Seoul\"}');"#
    );
}

#[test]
fn update_typed_transform() {
    let model = withme_today();
    let sql = jaorm::update(
        &model,
        Updater::transform(|fields| {
            let mut company: Company = fields.deserialize().unwrap();
            company.employee_count += 1;
            company.address.city = "Busan".into();
            jaorm::Fields::from_serialize(&company).unwrap()
        }),
        &Cond::field("id").equals(model.id().unwrap()),
    )
    .unwrap();
    assert_eq!(
        sql,
        "UPDATE `companies` SET `employee_count` = 13, `address` = JSON_SET(`address`, '$.city', 'Busan') WHERE `id` = 'some-id';"
    );
}

#[test]
fn flat_row_back_into_model() {
    let row = fields! {
        "id" => "some-id",
        "name" => "WithmeToday",
        "employeeCount" => 12,
        "address" => fields! { "city" => "Seoul", "street" => "Teheran-ro" },
    };
    let model = Model::from_flat("company", row);
    assert_eq!(model.id(), Some("some-id"));

    let company: Company = model.attributes_as().unwrap();
    assert_eq!(company.employee_count, 12);
    assert_eq!(jaorm::insert(&model).unwrap(), jaorm::insert(&withme_today()).unwrap());
}

#[test]
fn errors_are_typed() {
    let no_id = Model::new("company", fields! { "name" => "x" });
    assert_eq!(jaorm::insert(&no_id), Err(OrmError::IdRequired));
    assert_eq!(jaorm::select(&no_id), Err(OrmError::InvalidId));
    assert_eq!(jaorm::delete(&no_id), Err(OrmError::InvalidId));
    assert_eq!(
        jaorm::list(&no_id, &ListOptions::new()),
        Err(OrmError::InvalidId)
    );
    assert_eq!(
        jaorm::update(
            &ResourceIdentifier::new("company", "c"),
            Updater::transform(|f| f),
            &Cond::field("id").equals("c"),
        ),
        Err(OrmError::NotUpdatableObject)
    );
    assert_eq!(OrmError::InvalidId.to_string(), "invalid ID");
    assert_eq!(OrmError::IdRequired.to_string(), "ID is required");
    assert_eq!(OrmError::NotUpdatableObject.to_string(), "not updatable object");
}

#[test]
fn configured_compiler_lists_pages() {
    let compiler = Compiler::new(CompilerConfig::new().max_page_size(20).enable_logging());
    let sql = compiler
        .list(
            &withme_today(),
            &ListOptions::new()
                .page(2)
                .size(50)
                .cond(Cond::field("deleted").negate().equals(true))
                .sort_by(["-employee_count", "name"]),
        )
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `companies` INNER JOIN ( SELECT `id` FROM `companies` WHERE NOT `deleted` = true ORDER BY `employee_count` DESC, `name` LIMIT 20 OFFSET 40 ) AS `result` USING (`id`);"
    );
}

#[test]
fn resource_trait_in_generic_code() {
    fn table_of<R: Resource + ?Sized>(r: &R) -> String {
        jaorm::table_name(r.type_name())
    }
    assert_eq!(table_of("person"), "people");
    assert_eq!(table_of(&withme_today()), "companies");
    assert!(Value::from(withme_today().fields().clone()).is_object());
}
