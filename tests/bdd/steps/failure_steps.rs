use cucumber::then;

use crate::BoardWorld;

/// Assert a failure message appears exactly once on stderr.
#[then(expr = "{string} is reported once")]
async fn message_is_reported_once(world: &mut BoardWorld, message: String) {
    let count = world.last_stderr.matches(&message).count();
    assert_eq!(
        count, 1,
        "expected {message:?} exactly once on stderr, found {count}:\n{}",
        world.last_stderr
    );
}

#[then("nothing is printed on stdout")]
async fn nothing_is_printed_on_stdout(world: &mut BoardWorld) {
    assert!(
        world.last_stdout.trim().is_empty(),
        "expected empty stdout, got:\n{}",
        world.last_stdout
    );
}
