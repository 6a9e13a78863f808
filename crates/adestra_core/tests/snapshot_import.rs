use adestra_core::{
    ImportError, LessonFilter, MemoryStorage, NewClient, NewDog, NewLesson, NewPayment,
    PaymentStatus, Store, StoreError, STORAGE_KEY,
};
use adestra_core::KeyValueStorage;
use rust_decimal_macros::dec;
use serde_json::Value;

fn populated_store() -> Store<MemoryStorage> {
    let mut store = Store::open(MemoryStorage::new()).unwrap();
    let ana = store.create_client(NewClient::named("Ana")).unwrap();
    let rex = store.create_dog(NewDog::owned_by("Rex", &ana.id)).unwrap();
    store
        .create_lesson(NewLesson {
            date: "2024-01-10".to_string(),
            duration_minutes: 45.0,
            client_id: ana.id.clone(),
            dog_id: rex.id.clone(),
            notes: "leash work".to_string(),
        })
        .unwrap();
    store
        .create_payment(NewPayment {
            client_id: ana.id.clone(),
            amount: dec!(320.50),
            installment: true,
            installments: 2.0,
            date: "2024-01-10".to_string(),
            status: PaymentStatus::Pending,
            ..NewPayment::default()
        })
        .unwrap();
    store
}

#[test]
fn export_then_import_roundtrips_document() {
    let source = populated_store();
    let snapshot = source.export_snapshot().unwrap();

    let mut target = Store::open(MemoryStorage::new()).unwrap();
    target.import_snapshot(&snapshot).unwrap();

    assert_eq!(target.document(), source.document());
}

#[test]
fn export_is_pretty_and_mirrors_persisted_shape() {
    let store = populated_store();
    let snapshot = store.export_snapshot().unwrap();
    assert!(snapshot.contains('\n'));

    let exported: Value = serde_json::from_str(&snapshot).unwrap();
    let persisted: Value =
        serde_json::from_str(&store.storage().get(STORAGE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(exported, persisted);
    assert_eq!(exported["payments"][0]["installment"], "yes");
    assert_eq!(exported["payments"][0]["status"], "pendente");
}

#[test]
fn import_replaces_document_and_persists() {
    let source = populated_store();
    let snapshot = source.export_snapshot().unwrap();

    let mut target = Store::open(MemoryStorage::new()).unwrap();
    target.create_client(NewClient::named("Zeca")).unwrap();
    target.import_snapshot(&snapshot).unwrap();

    let names: Vec<_> = target
        .query_clients()
        .into_iter()
        .map(|client| client.name.clone())
        .collect();
    assert_eq!(names, vec!["Ana".to_string()]);

    let expected = target.document().clone();
    let reopened = Store::open(target.into_storage()).unwrap();
    assert_eq!(reopened.document(), &expected);
}

#[test]
fn import_missing_collections_is_rejected_without_side_effects() {
    let mut store = populated_store();
    let before = store.document().clone();
    let blob_before = store.storage().get(STORAGE_KEY).unwrap();

    let err = store.import_snapshot(r#"{"clientes": []}"#).unwrap_err();

    match err {
        StoreError::Import(ImportError::MissingCollections(names)) => {
            assert_eq!(names, vec!["dogs", "lessons", "payments"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.document(), &before);
    assert_eq!(store.storage().get(STORAGE_KEY).unwrap(), blob_before);
}

#[test]
fn import_of_invalid_json_is_rejected() {
    let mut store = populated_store();
    let before = store.document().clone();

    let err = store.import_snapshot("this is not json").unwrap_err();

    assert!(matches!(err, StoreError::Import(ImportError::Parse(_))));
    assert_eq!(store.document(), &before);
}

#[test]
fn empty_collections_are_acceptable() {
    let mut store = populated_store();
    store
        .import_snapshot(r#"{"clients": [], "dogs": [], "lessons": [], "payments": []}"#)
        .unwrap();
    assert!(store.document().is_empty());
}

#[test]
fn legacy_backup_imports_and_keeps_unknown_fields() {
    let legacy = r#"{
        "meta": {"version": "v1.0.0", "createdAt": "2024-01-01T09:00:00.000Z"},
        "clientes": [
            {"id": "lq1abc123456", "nome": "Ana", "telefone": "", "email": "", "obs": "",
             "createdAt": "2024-01-01T09:00:00.000Z", "apelido": "Aninha"}
        ],
        "caes": [
            {"id": "lq1dog000001", "nome": "Rex", "raca": "SRD", "idade": 3,
             "clienteId": "lq1abc123456", "obs": "", "createdAt": "2024-01-01T09:05:00.000Z"}
        ],
        "aulas": [
            {"id": "lq1les000001", "data": "2024-01-10", "duracao": 60,
             "clienteId": "lq1abc123456", "caoId": "lq1dog000001", "obs": "",
             "createdAt": "2024-01-10T10:00:00.000Z"}
        ],
        "pagamentos": [
            {"id": "lq1pay000001", "clienteId": "lq1abc123456", "valor": 200, "forma": "Pix",
             "parcelado": "nao", "parcelas": 1, "data": "2024-01-10", "obs": "",
             "status": "pago", "createdAt": "2024-01-10T10:00:00.000Z"}
        ]
    }"#;

    let mut store = Store::open(MemoryStorage::new()).unwrap();
    store.import_snapshot(legacy).unwrap();

    let ana = store.client("lq1abc123456").unwrap();
    assert_eq!(ana.name, "Ana");
    assert_eq!(ana.extra["apelido"], "Aninha");

    let rex = store.dog("lq1dog000001").unwrap();
    assert_eq!(rex.breed, "SRD");
    assert_eq!(rex.age, 3.0);

    let lessons = store.query_lessons(&LessonFilter::for_client("lq1abc123456"));
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].duration_minutes, 60.0);

    let payment = store.payment("lq1pay000001").unwrap();
    assert_eq!(payment.amount, dec!(200));
    assert!(!payment.installment);
    assert_eq!(payment.status, PaymentStatus::Paid);

    let exported: Value = serde_json::from_str(&store.export_snapshot().unwrap()).unwrap();
    assert_eq!(exported["clients"][0]["name"], "Ana");
    assert_eq!(exported["clients"][0]["apelido"], "Aninha");
    assert!(exported.get("clientes").is_none());
}

#[test]
fn loosely_typed_backup_imports_every_record() {
    let backup = r#"{
        "clientes": [{"id": "c1", "nome": "Ana", "telefone": null}],
        "caes": [{"id": "d1", "nome": "Rex", "idade": "2,5", "clienteId": "c1"}],
        "aulas": [
            {"id": "l1", "data": "2024-01-10", "duracao": 45.5, "clienteId": "c1", "caoId": "d1"},
            {"id": "l2", "data": "2024-01-11", "duracao": null, "clienteId": "c1", "caoId": "d1"}
        ],
        "pagamentos": [
            {"id": "p1", "clienteId": "c1", "valor": 99.9, "parcelas": 3.0, "parcelado": true,
             "data": "2024-01-10", "status": 7}
        ]
    }"#;

    let mut store = populated_store();
    store.import_snapshot(backup).unwrap();

    let document = store.document();
    assert_eq!(document.clients.len(), 1);
    assert_eq!(document.dogs.len(), 1);
    assert_eq!(document.lessons.len(), 2);
    assert_eq!(document.payments.len(), 1);

    assert_eq!(store.client("c1").unwrap().phone, "");
    assert_eq!(store.dog("d1").unwrap().age, 2.5);
    assert_eq!(store.lesson("l1").unwrap().duration_minutes, 45.5);
    assert_eq!(store.lesson("l2").unwrap().duration_minutes, 0.0);
    let payment = store.payment("p1").unwrap();
    assert_eq!(payment.amount, dec!(99.9));
    assert_eq!(payment.installments, 3.0);
    assert_eq!(payment.status, PaymentStatus::Paid);

    let exported: Value = serde_json::from_str(&store.export_snapshot().unwrap()).unwrap();
    assert_eq!(exported["lessons"][0]["durationMinutes"], 45.5);
    assert_eq!(exported["payments"][0]["installments"], 3);

    let expected = store.document().clone();
    let reopened = Store::open(store.into_storage()).unwrap();
    assert_eq!(reopened.document(), &expected);
}
