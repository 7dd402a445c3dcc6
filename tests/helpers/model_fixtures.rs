//! Common source-model fixtures for integration tests.

use umlgraph::model::{AnnotationUse, FieldUse, ProjectType, SourceModel, TypeKind, Visibility};

pub fn class(qualified_name: &str) -> ProjectType {
    ProjectType::new(qualified_name, TypeKind::Class)
}

pub fn interface(qualified_name: &str) -> ProjectType {
    ProjectType::new(qualified_name, TypeKind::Interface)
}

pub fn enumeration(qualified_name: &str) -> ProjectType {
    ProjectType::new(qualified_name, TypeKind::Enum)
}

pub fn annotation_type(qualified_name: &str) -> ProjectType {
    ProjectType::new(qualified_name, TypeKind::Annotation)
}

pub fn field(name: &str, declared_type: &str) -> FieldUse {
    let mut f = FieldUse::new(name, declared_type);
    f.visibility = Visibility::Private;
    f
}

pub fn enum_literal(name: &str) -> FieldUse {
    let mut f = FieldUse::new(name, "");
    f.is_enum_literal = true;
    f.is_static = true;
    f
}

pub fn ann(simple_name: &str) -> AnnotationUse {
    AnnotationUse::new(simple_name)
}

pub fn jpa(simple_name: &str) -> AnnotationUse {
    AnnotationUse::qualified(simple_name, format!("jakarta.persistence.{simple_name}"))
}

/// A small shop domain with a bidirectional Order/Item relationship
/// (`Order.items` mappedBy `order`), a unidirectional Customer reference,
/// and an enum.
pub fn shop_model() -> SourceModel {
    let mut order = class("com.shop.Order");
    order.annotations.push(jpa("Entity"));
    order.fields.push(
        field("items", "List<Item>").with_annotation(
            jpa("OneToMany")
                .with_value("mappedBy", "\"order\"")
                .with_value("orphanRemoval", "true"),
        ),
    );
    order.fields.push(
        field("customer", "Customer")
            .with_annotation(jpa("ManyToOne").with_value("optional", "false")),
    );
    order.fields.push(field("status", "OrderStatus"));

    let mut item = class("com.shop.Item");
    item.annotations.push(jpa("Entity"));
    item.fields
        .push(field("order", "Order").with_annotation(jpa("ManyToOne")));
    item.fields.push(field("name", "String"));

    let mut customer = class("com.crm.Customer");
    customer.annotations.push(jpa("Entity"));
    customer.fields.push(field("name", "String"));
    let customer = with_import(customer, "com.shop.Order");

    let mut status = enumeration("com.shop.OrderStatus");
    status.fields.push(enum_literal("NEW"));
    status.fields.push(enum_literal("SHIPPED"));

    let order = with_import(order, "com.crm.Customer");

    SourceModel::new()
        .with_type(order)
        .with_type(item)
        .with_type(customer)
        .with_type(status)
}

pub fn with_import(mut ty: ProjectType, qualified_name: &str) -> ProjectType {
    ty.imports = std::mem::take(&mut ty.imports).with_explicit(qualified_name);
    ty
}

pub fn with_wildcard(mut ty: ProjectType, package: &str) -> ProjectType {
    ty.imports = std::mem::take(&mut ty.imports).with_wildcard(package);
    ty
}
