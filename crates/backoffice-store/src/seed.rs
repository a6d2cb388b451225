// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Page catalog: one schema per page plus the literal records each page
//! starts with.

use anyhow::{Context, Result, anyhow};
use backoffice_app::{
    Derived, ExportSpec, FieldKind, FieldSpec, FilterKind, PageKind, Rule, Schema, SortDirection,
    validate_draft,
};
use std::collections::BTreeMap;

use crate::RecordStore;

type Fixture = &'static [(&'static str, &'static str)];

const ACTIVE_STATUSES: &[&str] = &["active", "inactive"];
const USER_ROLES: &[&str] = &["Administrator", "Support", "Editor", "Supervisor"];
const REGIONS: &[&str] = &["Metropolitan", "Valparaíso", "Biobío"];
const CUSTOMER_TYPES: &[&str] = &["person", "company"];
const PRODUCT_CATEGORIES: &[&str] = &["Books", "Courses", "Technology", "Electronics", "Accessories"];
const MOVEMENT_TYPES: &[&str] = &["In", "Out"];
const ORDER_STATUSES: &[&str] = &["pending", "completed", "cancelled"];
const SALE_STATUSES: &[&str] = &["Pending", "Paid", "Shipped", "Cancelled"];
const SHIPPING_METHODS: &[&str] = &["Store Pickup", "Standard Shipping", "Express Shipping"];
const PAYMENT_METHODS: &[&str] = &["Transfer", "Cash", "Card"];
const INVOICE_STATUSES: &[&str] = &["paid", "pending", "overdue"];
const ATTENDANCE_STATUSES: &[&str] = &["Present", "Absent", "Late"];
const STAFF: &[&str] = &[
    "Juan Pérez",
    "María Gómez",
    "Pedro Osorio",
    "Ana Martínez",
    "Luis Fernández",
];
const PURCHASE_STATUSES: &[&str] = &["pending", "completed", "cancelled"];
const WORKER_ROLES: &[&str] = &["Administrator", "Technician", "Salesperson", "Support"];
const TICKET_STATUSES: &[&str] = &["Pending", "In progress", "Resolved", "Closed"];
const PRIORITIES: &[&str] = &["Low", "Medium", "High", "Urgent"];
const WORK_ORDER_STATUSES: &[&str] = &["Pending", "In progress", "Completed"];
const SERVICE_TYPES: &[&str] = &["Maintenance", "Repair", "Warranty", "Installation"];

const NAME_RULES: &[Rule] = &[Rule::Required, Rule::MinLength(3)];
const REQUIRED: &[Rule] = &[Rule::Required];
const UNIQUE_EMAIL: &[Rule] = &[
    Rule::Required,
    Rule::Email,
    Rule::Unique {
        case_insensitive: true,
    },
];

pub static USERS: Schema = Schema {
    page: PageKind::Users,
    title: "Users",
    singular: "user",
    fields: &[
        FieldSpec::new("name", "Name", FieldKind::Text)
            .rules(NAME_RULES)
            .searchable()
            .sortable(),
        FieldSpec::new("email", "Email", FieldKind::Text)
            .rules(UNIQUE_EMAIL)
            .searchable()
            .sortable(),
        FieldSpec::new("role", "Role", FieldKind::Choice(USER_ROLES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .sortable()
            .default_value("Support"),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("active"),
    ],
    default_sort: Some(("name", SortDirection::Asc)),
    page_size: 5,
    export: Some(ExportSpec {
        file_name: "users.csv",
        columns: &["name", "email", "role", "status"],
        list_separator: "; ",
    }),
    derived: None,
};

pub static CUSTOMERS: Schema = Schema {
    page: PageKind::Customers,
    title: "Customers",
    singular: "customer",
    fields: &[
        FieldSpec::new("first_name", "First name", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("last_name", "Last name", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("tax_id", "Tax ID", FieldKind::Text)
            .rules(&[
                Rule::Required,
                Rule::TaxId,
                Rule::Unique {
                    case_insensitive: true,
                },
            ])
            .searchable(),
        FieldSpec::new("email", "Email", FieldKind::Text)
            .rules(UNIQUE_EMAIL)
            .searchable(),
        FieldSpec::new("phone", "Phone", FieldKind::Text)
            .rules(&[Rule::Required, Rule::PhoneDigits { min: 7, max: 9 }]),
        FieldSpec::new("address", "Address", FieldKind::Text)
            .rules(REQUIRED)
            .detail_only(),
        FieldSpec::new("region", "Region", FieldKind::Choice(REGIONS))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("Metropolitan"),
        FieldSpec::new("city", "City", FieldKind::Text)
            .rules(REQUIRED)
            .sortable(),
        FieldSpec::new("customer_type", "Type", FieldKind::Choice(CUSTOMER_TYPES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("person"),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("active"),
    ],
    default_sort: Some(("last_name", SortDirection::Asc)),
    page_size: 5,
    export: None,
    derived: None,
};

pub static SUPPLIERS: Schema = Schema {
    page: PageKind::Suppliers,
    title: "Suppliers",
    singular: "supplier",
    fields: &[
        FieldSpec::new("name", "Name", FieldKind::Text)
            .rules(&[
                Rule::Required,
                Rule::Unique {
                    case_insensitive: true,
                },
            ])
            .searchable()
            .sortable(),
        FieldSpec::new("email", "Email", FieldKind::Text)
            .rules(&[Rule::Required, Rule::Email])
            .searchable(),
        FieldSpec::new("phone", "Phone", FieldKind::Text).rules(REQUIRED),
        FieldSpec::new("tax_id", "Tax ID", FieldKind::Text)
            .rules(REQUIRED)
            .searchable(),
        FieldSpec::new("address", "Address", FieldKind::Text).rules(REQUIRED),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("active"),
    ],
    default_sort: Some(("name", SortDirection::Asc)),
    page_size: 5,
    export: None,
    derived: None,
};

pub static PURCHASES: Schema = Schema {
    page: PageKind::Purchases,
    title: "Purchases",
    singular: "purchase",
    fields: &[
        FieldSpec::new("supplier", "Supplier", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(PURCHASE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("pending"),
        FieldSpec::new("total", "Total", FieldKind::Amount)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
        FieldSpec::new("items", "Items", FieldKind::Integer)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
    ],
    default_sort: Some(("date", SortDirection::Desc)),
    page_size: 10,
    export: None,
    derived: None,
};

pub static PRODUCTS: Schema = Schema {
    page: PageKind::Products,
    title: "Products",
    singular: "product",
    fields: &[
        FieldSpec::new("name", "Name", FieldKind::Text)
            .rules(NAME_RULES)
            .searchable()
            .sortable(),
        FieldSpec::new("price", "Price", FieldKind::Amount)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
        FieldSpec::new("category", "Category", FieldKind::Choice(PRODUCT_CATEGORIES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .sortable(),
        FieldSpec::new("stock", "Stock", FieldKind::Integer)
            .rules(&[Rule::Required, Rule::NonNegative])
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("active"),
    ],
    default_sort: Some(("name", SortDirection::Asc)),
    page_size: 5,
    export: Some(ExportSpec {
        file_name: "products.csv",
        columns: &["name", "price", "category", "stock", "status"],
        list_separator: "; ",
    }),
    derived: None,
};

pub static CATEGORIES: Schema = Schema {
    page: PageKind::Categories,
    title: "Categories",
    singular: "category",
    fields: &[
        FieldSpec::new("name", "Name", FieldKind::Text)
            .rules(&[
                Rule::Required,
                Rule::MinLength(3),
                Rule::Unique {
                    case_insensitive: true,
                },
            ])
            .searchable()
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("active"),
    ],
    default_sort: Some(("name", SortDirection::Asc)),
    page_size: 5,
    export: None,
    derived: None,
};

pub static INVENTORY: Schema = Schema {
    page: PageKind::Inventory,
    title: "Inventory",
    singular: "item",
    fields: &[
        FieldSpec::new("name", "Name", FieldKind::Text)
            .rules(NAME_RULES)
            .searchable()
            .sortable(),
        FieldSpec::new("quantity", "Quantity", FieldKind::Integer)
            .rules(&[Rule::Required, Rule::NonNegative])
            .sortable(),
        FieldSpec::new("location", "Location", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("active"),
        FieldSpec::new("description", "Description", FieldKind::LongText).detail_only(),
    ],
    default_sort: Some(("name", SortDirection::Asc)),
    page_size: 5,
    export: None,
    derived: None,
};

pub static STOCK_MOVEMENTS: Schema = Schema {
    page: PageKind::StockMovements,
    title: "Stock movements",
    singular: "movement",
    fields: &[
        FieldSpec::new("product", "Product", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("kind", "Type", FieldKind::Choice(MOVEMENT_TYPES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("In"),
        FieldSpec::new("quantity", "Quantity", FieldKind::Integer)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("notes", "Notes", FieldKind::LongText),
    ],
    default_sort: Some(("date", SortDirection::Desc)),
    page_size: 5,
    export: Some(ExportSpec {
        file_name: "stock-movements.csv",
        columns: &["product", "kind", "quantity", "date", "notes"],
        list_separator: "; ",
    }),
    derived: None,
};

pub static ORDERS: Schema = Schema {
    page: PageKind::Orders,
    title: "Orders",
    singular: "order",
    fields: &[
        FieldSpec::new("order_number", "Order #", FieldKind::Text)
            .rules(&[
                Rule::Required,
                Rule::Unique {
                    case_insensitive: true,
                },
            ])
            .searchable()
            .sortable(),
        FieldSpec::new("customer_name", "Customer", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(ORDER_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("pending"),
        FieldSpec::new("total", "Total", FieldKind::Amount)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
        FieldSpec::new("items_count", "Items", FieldKind::Integer)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
    ],
    default_sort: Some(("order_number", SortDirection::Asc)),
    page_size: 5,
    export: Some(ExportSpec {
        file_name: "orders.csv",
        columns: &[
            "order_number",
            "customer_name",
            "date",
            "status",
            "total",
            "items_count",
        ],
        list_separator: "; ",
    }),
    derived: None,
};

pub static SALES: Schema = Schema {
    page: PageKind::Sales,
    title: "Sales",
    singular: "sale",
    fields: &[
        FieldSpec::new("customer", "Customer", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("products", "Products", FieldKind::List).rules(REQUIRED),
        FieldSpec::new("quantity", "Quantity", FieldKind::Integer)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
        FieldSpec::new("total", "Total", FieldKind::Amount)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
        FieldSpec::new("payment", "Payment", FieldKind::Choice(PAYMENT_METHODS))
            .rules(REQUIRED)
            .default_value("Transfer"),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("shipping_address", "Shipping address", FieldKind::Text).detail_only(),
        FieldSpec::new("phone", "Phone", FieldKind::Text)
            .rules(&[Rule::PhoneDigits { min: 7, max: 11 }])
            .detail_only(),
        FieldSpec::new("status", "Status", FieldKind::Choice(SALE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("Pending"),
        FieldSpec::new("shipping_method", "Shipping", FieldKind::Choice(SHIPPING_METHODS))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("Store Pickup"),
        FieldSpec::new("notes", "Notes", FieldKind::LongText).detail_only(),
        FieldSpec::new("coupon", "Coupon", FieldKind::Text)
            .rules(&[Rule::Pattern {
                regex: r"^DESC\d{1,2}$",
                message: "must look like DESC10",
            }])
            .detail_only(),
        FieldSpec::new("tax_percent", "Tax %", FieldKind::Decimal)
            .rules(&[Rule::Required, Rule::NonNegative])
            .default_value("19")
            .detail_only(),
        FieldSpec::new("tax_amount", "Tax", FieldKind::Amount)
            .derived()
            .detail_only(),
        FieldSpec::new("discount", "Discount", FieldKind::Amount)
            .derived()
            .detail_only(),
        FieldSpec::new("final_total", "Final Total", FieldKind::Amount)
            .derived()
            .sortable(),
    ],
    default_sort: Some(("date", SortDirection::Desc)),
    page_size: 5,
    export: Some(ExportSpec {
        file_name: "sales.csv",
        columns: &[
            "customer",
            "products",
            "quantity",
            "payment",
            "date",
            "status",
            "final_total",
        ],
        list_separator: " / ",
    }),
    derived: Some(Derived::SaleTotals),
};

pub static INVOICES: Schema = Schema {
    page: PageKind::Invoices,
    title: "Invoices",
    singular: "invoice",
    fields: &[
        FieldSpec::new("number", "Number", FieldKind::Text)
            .rules(&[
                Rule::Required,
                Rule::Unique {
                    case_insensitive: true,
                },
            ])
            .searchable()
            .sortable(),
        FieldSpec::new("customer", "Customer", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("total", "Total", FieldKind::Amount)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(INVOICE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("pending"),
    ],
    default_sort: Some(("date", SortDirection::Asc)),
    page_size: 5,
    export: Some(ExportSpec {
        file_name: "invoices.csv",
        columns: &["number", "customer", "date", "total", "status"],
        list_separator: "; ",
    }),
    derived: None,
};

pub static PAYMENTS: Schema = Schema {
    page: PageKind::Payments,
    title: "Payments",
    singular: "payment",
    fields: &[
        FieldSpec::new("payer", "Payer", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("amount", "Amount", FieldKind::Amount)
            .rules(&[Rule::Required, Rule::Positive])
            .sortable(),
        FieldSpec::new("method", "Method", FieldKind::Choice(PAYMENT_METHODS))
            .rules(REQUIRED)
            .filter(FilterKind::MultiSelect)
            .default_value("Transfer"),
    ],
    default_sort: Some(("date", SortDirection::Desc)),
    page_size: 5,
    export: Some(ExportSpec {
        file_name: "payments.csv",
        columns: &["payer", "date", "amount", "method"],
        list_separator: "; ",
    }),
    derived: None,
};

pub static REPORTS: Schema = Schema {
    page: PageKind::Reports,
    title: "Reports",
    singular: "report",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("summary", "Summary", FieldKind::LongText),
    ],
    default_sort: None,
    page_size: 4,
    export: Some(ExportSpec {
        file_name: "reports.csv",
        columns: &["title", "date", "summary"],
        list_separator: "; ",
    }),
    derived: None,
};

pub static ATTENDANCE: Schema = Schema {
    page: PageKind::Attendance,
    title: "Attendance",
    singular: "attendance entry",
    fields: &[
        FieldSpec::new("worker", "Worker", FieldKind::Choice(STAFF))
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(ATTENDANCE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("Present"),
        FieldSpec::new("notes", "Notes", FieldKind::LongText),
    ],
    default_sort: Some(("date", SortDirection::Desc)),
    page_size: 5,
    export: None,
    derived: None,
};

pub static WORKERS: Schema = Schema {
    page: PageKind::Workers,
    title: "Workers",
    singular: "worker",
    fields: &[
        FieldSpec::new("full_name", "Full name", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("email", "Email", FieldKind::Text).rules(&[Rule::Required, Rule::Email]),
        FieldSpec::new("role", "Role", FieldKind::Choice(WORKER_ROLES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("active"),
    ],
    default_sort: Some(("full_name", SortDirection::Asc)),
    page_size: 5,
    export: None,
    derived: None,
};

pub static ROLES: Schema = Schema {
    page: PageKind::Roles,
    title: "Roles & permissions",
    singular: "role",
    fields: &[
        FieldSpec::new("name", "Role", FieldKind::Text)
            .rules(&[
                Rule::Required,
                Rule::Unique {
                    case_insensitive: true,
                },
            ])
            .searchable()
            .sortable(),
        FieldSpec::new("permissions", "Permissions", FieldKind::List)
            .filter(FilterKind::Contains),
    ],
    default_sort: Some(("name", SortDirection::Asc)),
    page_size: 10,
    export: Some(ExportSpec {
        file_name: "roles.csv",
        columns: &["name", "permissions"],
        list_separator: "; ",
    }),
    derived: None,
};

pub static TICKETS: Schema = Schema {
    page: PageKind::Tickets,
    title: "Support tickets",
    singular: "ticket",
    fields: &[
        FieldSpec::new("client", "Client", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("subject", "Subject", FieldKind::Text)
            .rules(NAME_RULES)
            .searchable(),
        FieldSpec::new("date_created", "Created", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(TICKET_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("Pending"),
        FieldSpec::new("priority", "Priority", FieldKind::Choice(PRIORITIES))
            .rules(REQUIRED)
            .filter(FilterKind::MultiSelect)
            .sortable()
            .default_value("Medium"),
        FieldSpec::new("assigned_to", "Assigned to", FieldKind::Text).sortable(),
        FieldSpec::new("description", "Description", FieldKind::LongText).detail_only(),
        FieldSpec::new("comments", "Comments", FieldKind::LongText).detail_only(),
    ],
    default_sort: Some(("date_created", SortDirection::Desc)),
    page_size: 5,
    export: None,
    derived: None,
};

pub static WORK_ORDERS: Schema = Schema {
    page: PageKind::WorkOrders,
    title: "Work orders",
    singular: "work order",
    fields: &[
        FieldSpec::new("client", "Client", FieldKind::Text)
            .rules(REQUIRED)
            .searchable()
            .sortable(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .rules(REQUIRED)
            .filter(FilterKind::DateRange)
            .sortable(),
        FieldSpec::new("status", "Status", FieldKind::Choice(WORK_ORDER_STATUSES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("Pending"),
        FieldSpec::new("description", "Description", FieldKind::LongText)
            .rules(REQUIRED)
            .detail_only(),
        FieldSpec::new("technician", "Technician", FieldKind::Text)
            .searchable()
            .sortable(),
        FieldSpec::new("priority", "Priority", FieldKind::Choice(PRIORITIES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("Medium"),
        FieldSpec::new("service_type", "Service", FieldKind::Choice(SERVICE_TYPES))
            .rules(REQUIRED)
            .filter(FilterKind::Exact)
            .default_value("Maintenance"),
        FieldSpec::new("observations", "Observations", FieldKind::LongText).detail_only(),
        FieldSpec::new("estimated_cost", "Estimated cost", FieldKind::Amount)
            .rules(&[Rule::NonNegative])
            .sortable(),
        FieldSpec::new("delivery_date", "Delivery", FieldKind::Date)
            .rules(&[Rule::NotBefore("date")])
            .sortable(),
    ],
    default_sort: Some(("date", SortDirection::Desc)),
    page_size: 5,
    export: Some(ExportSpec {
        file_name: "work-orders.csv",
        columns: &[
            "client",
            "date",
            "status",
            "technician",
            "priority",
            "service_type",
            "estimated_cost",
            "delivery_date",
        ],
        list_separator: "; ",
    }),
    derived: None,
};

pub static CATALOG: [&Schema; 18] = [
    &USERS,
    &CUSTOMERS,
    &SUPPLIERS,
    &PURCHASES,
    &PRODUCTS,
    &CATEGORIES,
    &INVENTORY,
    &STOCK_MOVEMENTS,
    &ORDERS,
    &SALES,
    &INVOICES,
    &PAYMENTS,
    &REPORTS,
    &ATTENDANCE,
    &WORKERS,
    &ROLES,
    &TICKETS,
    &WORK_ORDERS,
];

pub fn schema_for(page: PageKind) -> Option<&'static Schema> {
    CATALOG.into_iter().find(|schema| schema.page == page)
}

const USER_ROWS: &[Fixture] = &[
    &[
        ("name", "Juan Pérez"),
        ("email", "juan@example.com"),
        ("role", "Administrator"),
        ("status", "active"),
    ],
    &[
        ("name", "María López"),
        ("email", "maria@example.com"),
        ("role", "Support"),
        ("status", "active"),
    ],
    &[
        ("name", "Carlos Ruiz"),
        ("email", "carlos@example.com"),
        ("role", "Editor"),
        ("status", "inactive"),
    ],
    &[
        ("name", "Ana Torres"),
        ("email", "ana@example.com"),
        ("role", "Supervisor"),
        ("status", "active"),
    ],
    &[
        ("name", "Luis Fernández"),
        ("email", "luis@example.com"),
        ("role", "Support"),
        ("status", "inactive"),
    ],
    &[
        ("name", "Sofía Gómez"),
        ("email", "sofia@example.com"),
        ("role", "Editor"),
        ("status", "active"),
    ],
];

const CUSTOMER_ROWS: &[Fixture] = &[
    &[
        ("first_name", "Pedro"),
        ("last_name", "Osorio"),
        ("tax_id", "12345678-5"),
        ("email", "pedro@mail.com"),
        ("phone", "912345678"),
        ("address", "123 Example St"),
        ("region", "Metropolitan"),
        ("city", "Santiago"),
        ("customer_type", "person"),
        ("status", "active"),
    ],
    &[
        ("first_name", "Maria"),
        ("last_name", "Gonzalez"),
        ("tax_id", "98765432-1"),
        ("email", "maria@mail.com"),
        ("phone", "987654321"),
        ("address", "456 Liberty Ave"),
        ("region", "Valparaíso"),
        ("city", "Viña del Mar"),
        ("customer_type", "company"),
        ("status", "inactive"),
    ],
    &[
        ("first_name", "Lucía"),
        ("last_name", "Rojas"),
        ("tax_id", "11222333-K"),
        ("email", "lucia@mail.com"),
        ("phone", "934567812"),
        ("address", "789 Harbor Rd"),
        ("region", "Biobío"),
        ("city", "Concepción"),
        ("customer_type", "person"),
        ("status", "active"),
    ],
];

const SUPPLIER_ROWS: &[Fixture] = &[
    &[
        ("name", "Tech Distribution"),
        ("email", "sales@techdistribution.cl"),
        ("phone", "+56 9 8888 9999"),
        ("tax_id", "76.123.456-7"),
        ("address", "123 Alameda Ave, Santiago"),
        ("status", "active"),
    ],
    &[
        ("name", "Central Bookstore"),
        ("email", "contact@centralbooks.cl"),
        ("phone", "+56 9 7777 6666"),
        ("tax_id", "77.765.432-1"),
        ("address", "456 Books St, Valparaíso"),
        ("status", "inactive"),
    ],
    &[
        ("name", "Office Supplies Ltd"),
        ("email", "orders@officesupplies.cl"),
        ("phone", "+56 2 2345 6789"),
        ("tax_id", "78.111.222-3"),
        ("address", "12 Market Sq, Concepción"),
        ("status", "active"),
    ],
];

const PURCHASE_ROWS: &[Fixture] = &[
    &[
        ("supplier", "Supplier One"),
        ("date", "2025-06-20"),
        ("status", "completed"),
        ("total", "152000"),
        ("items", "3"),
    ],
    &[
        ("supplier", "Supplier Two"),
        ("date", "2025-06-21"),
        ("status", "pending"),
        ("total", "87990"),
        ("items", "5"),
    ],
];

const PRODUCT_ROWS: &[Fixture] = &[
    &[
        ("name", "React Handbook"),
        ("price", "19990"),
        ("category", "Books"),
        ("stock", "12"),
        ("status", "active"),
    ],
    &[
        ("name", "Tailwind Course"),
        ("price", "9990"),
        ("category", "Courses"),
        ("stock", "8"),
        ("status", "inactive"),
    ],
    &[
        ("name", "Acer Laptop"),
        ("price", "499990"),
        ("category", "Technology"),
        ("stock", "4"),
        ("status", "active"),
    ],
    &[
        ("name", "USB-C Hub"),
        ("price", "24990"),
        ("category", "Accessories"),
        ("stock", "20"),
        ("status", "active"),
    ],
    &[
        ("name", "Wireless Mouse"),
        ("price", "12990"),
        ("category", "Electronics"),
        ("stock", "0"),
        ("status", "inactive"),
    ],
    &[
        ("name", "The Rust Book"),
        ("price", "29990"),
        ("category", "Books"),
        ("stock", "7"),
        ("status", "active"),
    ],
];

const CATEGORY_ROWS: &[Fixture] = &[
    &[("name", "Books"), ("status", "active")],
    &[("name", "Technology"), ("status", "active")],
    &[("name", "Courses"), ("status", "inactive")],
];

const INVENTORY_ROWS: &[Fixture] = &[
    &[
        ("name", "HDMI Cable"),
        ("quantity", "30"),
        ("location", "Warehouse A"),
        ("status", "active"),
        ("description", "2 meter HDMI cable"),
    ],
    &[
        ("name", "24-inch Monitor"),
        ("quantity", "10"),
        ("location", "Warehouse B"),
        ("status", "active"),
        ("description", "Full HD LCD monitor"),
    ],
    &[
        ("name", "Mechanical Keyboard"),
        ("quantity", "5"),
        ("location", "Warehouse A"),
        ("status", "inactive"),
        ("description", "Backlit keyboard"),
    ],
];

const STOCK_MOVEMENT_ROWS: &[Fixture] = &[
    &[
        ("product", "React Handbook"),
        ("kind", "In"),
        ("quantity", "5"),
        ("date", "2025-06-20"),
        ("notes", "Stock purchase"),
    ],
    &[
        ("product", "Acer Laptop"),
        ("kind", "Out"),
        ("quantity", "1"),
        ("date", "2025-06-19"),
        ("notes", "Sale completed"),
    ],
    &[
        ("product", "Tailwind Course"),
        ("kind", "In"),
        ("quantity", "10"),
        ("date", "2025-06-15"),
        ("notes", "Donated courses"),
    ],
];

const ORDER_ROWS: &[Fixture] = &[
    &[
        ("order_number", "ORD001"),
        ("customer_name", "Juan Pérez"),
        ("date", "2025-06-20"),
        ("status", "pending"),
        ("total", "120000"),
        ("items_count", "3"),
    ],
    &[
        ("order_number", "ORD002"),
        ("customer_name", "María López"),
        ("date", "2025-06-21"),
        ("status", "completed"),
        ("total", "250000"),
        ("items_count", "5"),
    ],
    &[
        ("order_number", "ORD003"),
        ("customer_name", "Carlos Gómez"),
        ("date", "2025-06-22"),
        ("status", "cancelled"),
        ("total", "50000"),
        ("items_count", "1"),
    ],
];

const SALE_ROWS: &[Fixture] = &[
    &[
        ("customer", "Juan Pérez"),
        ("products", "React Handbook, The Rust Book"),
        ("quantity", "2"),
        ("total", "20000"),
        ("payment", "Transfer"),
        ("date", "2025-06-25"),
        ("shipping_address", "123 Evergreen Ave"),
        ("phone", "+56 9 1234 5678"),
        ("status", "Paid"),
        ("notes", "Deliver before 6 PM"),
        ("coupon", "DESC10"),
        ("tax_percent", "19"),
        ("shipping_method", "Standard Shipping"),
    ],
    &[
        ("customer", "Lucía Rojas"),
        ("products", "Acer Laptop"),
        ("quantity", "1"),
        ("total", "499990"),
        ("payment", "Card"),
        ("date", "2025-06-27"),
        ("shipping_address", "789 Harbor Rd"),
        ("phone", "934567812"),
        ("status", "Shipped"),
        ("tax_percent", "19"),
        ("shipping_method", "Express Shipping"),
    ],
    &[
        ("customer", "Pedro Osorio"),
        ("products", "USB-C Hub, Wireless Mouse"),
        ("quantity", "2"),
        ("total", "37980"),
        ("payment", "Cash"),
        ("date", "2025-06-28"),
        ("status", "Pending"),
        ("coupon", "DESC5"),
        ("tax_percent", "19"),
        ("shipping_method", "Store Pickup"),
    ],
];

const INVOICE_ROWS: &[Fixture] = &[
    &[
        ("number", "INV-1001"),
        ("customer", "Pedro Osorio"),
        ("date", "2025-06-01"),
        ("total", "19990"),
        ("status", "paid"),
    ],
    &[
        ("number", "INV-1002"),
        ("customer", "Lucía Rojas"),
        ("date", "2025-06-10"),
        ("total", "29990"),
        ("status", "pending"),
    ],
    &[
        ("number", "INV-1003"),
        ("customer", "Maria Gonzalez"),
        ("date", "2025-05-15"),
        ("total", "9990"),
        ("status", "overdue"),
    ],
];

const PAYMENT_ROWS: &[Fixture] = &[
    &[
        ("payer", "Juan Pérez"),
        ("date", "2025-06-20"),
        ("amount", "15990"),
        ("method", "Transfer"),
    ],
    &[
        ("payer", "María López"),
        ("date", "2025-06-19"),
        ("amount", "8990"),
        ("method", "Cash"),
    ],
    &[
        ("payer", "Carlos Díaz"),
        ("date", "2025-06-18"),
        ("amount", "12400"),
        ("method", "Card"),
    ],
];

const REPORT_ROWS: &[Fixture] = &[
    &[
        ("title", "Weekly Sales"),
        ("date", "2025-06-20"),
        ("summary", "Weekly sales summary."),
    ],
    &[
        ("title", "Current Inventory"),
        ("date", "2025-06-18"),
        ("summary", "Available stock report."),
    ],
    &[
        ("title", "Monthly Revenue"),
        ("date", "2025-06-01"),
        ("summary", "Monthly revenue summary."),
    ],
    &[
        ("title", "Daily Report"),
        ("date", "2025-06-21"),
        ("summary", "Daily operations detail."),
    ],
    &[
        ("title", "Quarterly Balance"),
        ("date", "2025-06-10"),
        ("summary", "Balance for the quarter."),
    ],
    &[
        ("title", "Annual Report"),
        ("date", "2025-01-01"),
        ("summary", "Full-year analysis."),
    ],
];

const ATTENDANCE_ROWS: &[Fixture] = &[
    &[
        ("worker", "Juan Pérez"),
        ("date", "2025-06-20"),
        ("status", "Present"),
        ("notes", "Arrived on time"),
    ],
    &[
        ("worker", "María Gómez"),
        ("date", "2025-06-20"),
        ("status", "Absent"),
        ("notes", "Sick leave"),
    ],
    &[
        ("worker", "Pedro Osorio"),
        ("date", "2025-06-19"),
        ("status", "Present"),
    ],
];

const WORKER_ROWS: &[Fixture] = &[
    &[
        ("full_name", "Pedro Osorio"),
        ("email", "pedro@company.cl"),
        ("role", "Administrator"),
        ("status", "active"),
    ],
    &[
        ("full_name", "María López"),
        ("email", "maria@company.cl"),
        ("role", "Technician"),
        ("status", "active"),
    ],
    &[
        ("full_name", "Carlos Ruiz"),
        ("email", "carlos@company.cl"),
        ("role", "Salesperson"),
        ("status", "inactive"),
    ],
];

const ROLE_ROWS: &[Fixture] = &[
    &[
        ("name", "admin"),
        ("permissions", "manage_users, edit_roles, view_reports"),
    ],
    &[
        ("name", "support"),
        ("permissions", "view_tickets, respond_tickets"),
    ],
    &[
        ("name", "technician"),
        ("permissions", "view_work_orders, update_status"),
    ],
];

const TICKET_ROWS: &[Fixture] = &[
    &[
        ("client", "Juan Pérez"),
        ("subject", "Device does not power on"),
        ("date_created", "2025-06-20"),
        ("status", "Pending"),
        ("priority", "High"),
        ("assigned_to", "María Tech"),
        ("description", "The device will not start after maintenance."),
    ],
    &[
        ("client", "María López"),
        ("subject", "Printer problem"),
        ("date_created", "2025-06-19"),
        ("status", "In progress"),
        ("priority", "Medium"),
        ("assigned_to", "Carlos Tech"),
        ("description", "The printer is unresponsive and reports a paper error."),
        ("comments", "Replacement part requested."),
    ],
    &[
        ("client", "Carlos Díaz"),
        ("subject", "Screen unresponsive"),
        ("date_created", "2025-06-18"),
        ("status", "Resolved"),
        ("priority", "High"),
        ("assigned_to", "Juan Tech"),
        ("description", "Replaced the display flex cable."),
        ("comments", "Customer satisfied."),
    ],
    &[
        ("client", "Ana Torres"),
        ("subject", "WiFi connection drops"),
        ("date_created", "2025-06-17"),
        ("status", "Pending"),
        ("priority", "Low"),
        ("assigned_to", "María Tech"),
        ("description", "The device keeps losing the WiFi signal."),
    ],
    &[
        ("client", "Luis Martínez"),
        ("subject", "Software crash"),
        ("date_created", "2025-06-16"),
        ("status", "In progress"),
        ("priority", "Urgent"),
        ("assigned_to", "Carlos Tech"),
        ("description", "The application closes unexpectedly."),
        ("comments", "Under review with development."),
    ],
    &[
        ("client", "Sofía Gómez"),
        ("subject", "Cannot print"),
        ("date_created", "2025-06-15"),
        ("status", "Closed"),
        ("priority", "Medium"),
        ("assigned_to", "Juan Tech"),
        ("description", "Printer jammed with a paper error."),
        ("comments", "Repair completed."),
    ],
];

const WORK_ORDER_ROWS: &[Fixture] = &[
    &[
        ("client", "Juan Pérez"),
        ("date", "2025-06-20"),
        ("status", "Completed"),
        ("description", "General device check."),
        ("technician", "Juan Tech"),
        ("priority", "High"),
        ("service_type", "Maintenance"),
        ("observations", "Customer asked for an extra battery check."),
        ("estimated_cost", "12000"),
        ("delivery_date", "2025-06-25"),
    ],
    &[
        ("client", "María López"),
        ("date", "2025-06-19"),
        ("status", "In progress"),
        ("description", "Parts replacement."),
        ("technician", "María Tech"),
        ("priority", "Medium"),
        ("service_type", "Repair"),
        ("estimated_cost", "8000"),
        ("delivery_date", "2025-06-23"),
    ],
    &[
        ("client", "Carlos Díaz"),
        ("date", "2025-06-18"),
        ("status", "Pending"),
        ("description", "Initial diagnosis."),
        ("technician", "Carlos Tech"),
        ("priority", "Low"),
        ("service_type", "Warranty"),
    ],
    &[
        ("client", "Ana González"),
        ("date", "2025-06-21"),
        ("status", "In progress"),
        ("description", "Software update."),
        ("technician", "Juan Tech"),
        ("priority", "High"),
        ("service_type", "Maintenance"),
        ("observations", "Needs urgent installation."),
        ("estimated_cost", "15000"),
        ("delivery_date", "2025-06-27"),
    ],
    &[
        ("client", "Luis Fernández"),
        ("date", "2025-06-17"),
        ("status", "Completed"),
        ("description", "Screen repair."),
        ("technician", "María Tech"),
        ("priority", "Medium"),
        ("service_type", "Repair"),
        ("observations", "Display replaced."),
        ("estimated_cost", "20000"),
        ("delivery_date", "2025-06-22"),
    ],
    &[
        ("client", "Sofía Martínez"),
        ("date", "2025-06-16"),
        ("status", "Pending"),
        ("description", "New hardware installation."),
        ("technician", "Carlos Tech"),
        ("priority", "Urgent"),
        ("service_type", "Installation"),
        ("observations", "Customer needs same-day support."),
        ("estimated_cost", "25000"),
        ("delivery_date", "2025-06-20"),
    ],
    &[
        ("client", "Pedro Ramírez"),
        ("date", "2025-06-15"),
        ("status", "Completed"),
        ("description", "Operating system tune-up."),
        ("technician", "Juan Tech"),
        ("priority", "Low"),
        ("service_type", "Maintenance"),
        ("estimated_cost", "10000"),
        ("delivery_date", "2025-06-19"),
    ],
];

pub fn fixtures(page: PageKind) -> &'static [Fixture] {
    match page {
        PageKind::Dashboard => &[],
        PageKind::Users => USER_ROWS,
        PageKind::Customers => CUSTOMER_ROWS,
        PageKind::Suppliers => SUPPLIER_ROWS,
        PageKind::Purchases => PURCHASE_ROWS,
        PageKind::Products => PRODUCT_ROWS,
        PageKind::Categories => CATEGORY_ROWS,
        PageKind::Inventory => INVENTORY_ROWS,
        PageKind::StockMovements => STOCK_MOVEMENT_ROWS,
        PageKind::Orders => ORDER_ROWS,
        PageKind::Sales => SALE_ROWS,
        PageKind::Invoices => INVOICE_ROWS,
        PageKind::Payments => PAYMENT_ROWS,
        PageKind::Reports => REPORT_ROWS,
        PageKind::Attendance => ATTENDANCE_ROWS,
        PageKind::Workers => WORKER_ROWS,
        PageKind::Roles => ROLE_ROWS,
        PageKind::Tickets => TICKET_ROWS,
        PageKind::WorkOrders => WORK_ORDER_ROWS,
    }
}

/// Builds a fresh store for `page` from its fixtures. Every fixture row goes
/// through the same validation as a create, in order, so ids start at 1.
pub fn seed_store(page: PageKind) -> Result<RecordStore> {
    let schema = schema_for(page)
        .with_context(|| format!("page {} has no record table", page.slug()))?;
    let mut store = RecordStore::new(page);
    for (index, row) in fixtures(page).iter().enumerate() {
        let values: BTreeMap<String, String> = row
            .iter()
            .map(|(field, value)| ((*field).to_owned(), (*value).to_owned()))
            .collect();
        let fields = validate_draft(schema, &values, store.records(), None).map_err(|errors| {
            anyhow!(
                "{} fixture row {} is invalid: {errors}",
                page.slug(),
                index + 1
            )
        })?;
        store.insert(fields);
    }
    Ok(store)
}

/// Record count per page, for the dashboard cards.
pub fn dashboard_counts() -> Result<Vec<(PageKind, usize)>> {
    PageKind::ALL
        .into_iter()
        .filter(|page| page.has_records())
        .map(|page| Ok((page, seed_store(page)?.len())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CATALOG, dashboard_counts, schema_for, seed_store};
    use backoffice_app::{FieldKind, FilterKind, PageKind};

    #[test]
    fn every_record_page_has_a_schema() {
        for page in PageKind::ALL {
            assert_eq!(
                schema_for(page).is_some(),
                page.has_records(),
                "page {page:?}"
            );
        }
    }

    #[test]
    fn every_fixture_validates() {
        for schema in CATALOG {
            let store = seed_store(schema.page).expect("fixtures should validate");
            assert!(!store.is_empty(), "page {:?} has no fixtures", schema.page);
        }
    }

    #[test]
    fn schema_references_resolve() {
        for schema in CATALOG {
            if let Some((field, _)) = schema.default_sort {
                assert!(schema.field(field).is_some(), "{} sort {field}", schema.title);
            }
            if let Some(export) = schema.export {
                for column in export.columns {
                    assert!(schema.field(column).is_some(), "{} column {column}", schema.title);
                }
            }
            for field in schema.fields {
                if let FieldKind::Choice(options) = field.kind
                    && !field.default.is_empty()
                {
                    assert!(options.contains(&field.default), "{}.{}", schema.title, field.name);
                }
                if field.filter == Some(FilterKind::DateRange) {
                    assert_eq!(field.kind, FieldKind::Date, "{}.{}", schema.title, field.name);
                }
            }
        }
    }

    #[test]
    fn dashboard_counts_cover_record_pages() {
        let counts = dashboard_counts().expect("counts");
        assert_eq!(counts.len(), CATALOG.len());
        assert!(counts.contains(&(PageKind::Tickets, 6)));
        assert!(counts.contains(&(PageKind::Purchases, 2)));
        assert!(counts.contains(&(PageKind::Reports, 6)));
        assert!(counts.contains(&(PageKind::Workers, 3)));
    }

    #[test]
    fn seeded_ids_start_at_one() {
        let store = seed_store(PageKind::Roles).expect("seed roles");
        let ids: Vec<i64> = store.records().iter().map(|record| record.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn dashboard_has_no_store() {
        assert!(seed_store(PageKind::Dashboard).is_err());
    }
}
