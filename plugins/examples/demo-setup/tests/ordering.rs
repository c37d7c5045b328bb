use demo_setup_example::DemoSetupPlugin;
use otopi_core::environment::EnvValue;
use otopi_core::kernel::bootstrap::Context;

#[tokio::test]
async fn handlers_run_in_first_second_third_order_despite_registration_order() {
    let mut ctx = Context::new();
    ctx.register_plugin(Box::new(DemoSetupPlugin)).expect("register");
    ctx.build_sequence().expect("build");
    ctx.run_sequence().await.expect("run");

    let order = match ctx.environment().get("DEMO_SETUP_ORDER") {
        Some(EnvValue::StringList(list)) => list.clone(),
        other => panic!("unexpected DEMO_SETUP_ORDER value: {other:?}"),
    };
    assert_eq!(order, vec!["first", "second", "third"]);
}
