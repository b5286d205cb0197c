use advent_mount::{
    AnswerNode, Application, Flags, Harness, HarnessError, InitOptions, InputSource, Instance,
    Page, Part, Result,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

type Gate = oneshot::Sender<std::result::Result<String, String>>;

/// Input source whose fetches stay pending until the test releases them.
#[derive(Default)]
struct GatedInputs {
    gates: Mutex<HashMap<String, oneshot::Receiver<std::result::Result<String, String>>>>,
}

impl GatedInputs {
    fn gate(&self, locator: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(locator.to_string(), rx);
        tx
    }
}

fn not_found(message: String) -> HarnessError {
    HarnessError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, message))
}

#[async_trait]
impl InputSource for GatedInputs {
    async fn fetch_text(&self, locator: &str) -> Result<String> {
        let gate = self.gates.lock().unwrap().remove(locator);
        match gate {
            Some(rx) => match rx.await {
                Ok(Ok(text)) => Ok(text),
                Ok(Err(message)) => Err(not_found(message)),
                Err(_) => Err(not_found("gate dropped".to_string())),
            },
            None => Err(not_found(format!("no input named {}", locator))),
        }
    }
}

struct Recorded {
    flags: Flags,
}

impl Instance for Recorded {
    fn flags(&self) -> &Flags {
        &self.flags
    }
}

/// Records every init call in order.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<(Flags, AnswerNode)>>,
}

impl Recorder {
    fn parts(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(f, _)| f.part.0).collect()
    }
}

impl Application for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn init(&self, options: InitOptions) -> Result<Box<dyn Instance>> {
        options
            .node
            .render(format!("answer for part {}", options.flags.part));
        self.calls
            .lock()
            .unwrap()
            .push((options.flags.clone(), options.node.clone()));
        Ok(Box::new(Recorded {
            flags: options.flags,
        }))
    }
}

struct Rejects;

impl Application for Rejects {
    fn name(&self) -> &str {
        "rejects"
    }

    fn init(&self, _options: InitOptions) -> Result<Box<dyn Instance>> {
        Err(HarnessError::application("rejects", "input is not a number"))
    }
}

fn setup() -> (Page, Arc<GatedInputs>, Harness) {
    let page = Page::new();
    let inputs = Arc::new(GatedInputs::default());
    let harness = Harness::new(Arc::new(page.clone()), inputs.clone());
    (page, inputs, harness)
}

#[tokio::test]
async fn test_container_is_appended_before_fetch_resolves() {
    let (page, inputs, harness) = setup();
    let app = Arc::new(Recorder::default());
    let gate = inputs.gate("part1.txt");

    let handle = harness.mount(app.clone(), Part(1), "part1.txt");
    assert_eq!(page.len(), 1);

    // 讓 spawn 的任務先跑到 fetch 的等待點
    tokio::task::yield_now().await;
    assert!(!handle.is_finished());
    assert!(app.parts().is_empty());

    let blocks = page.blocks();
    assert_eq!(blocks[0].label, "(Solution 1)");
    assert_eq!(blocks[0].margin_bottom_px, 16);
    assert!(blocks[0].answer.is_empty());

    gate.send(Ok("42".to_string())).unwrap();
    tokio_test::assert_ok!(handle.settled().await);
}

#[tokio::test]
async fn test_init_receives_node_and_flags_exactly_once() {
    let (page, inputs, harness) = setup();
    let app = Arc::new(Recorder::default());
    inputs.gate("part1.txt").send(Ok("42".to_string())).unwrap();

    let instance = tokio_test::assert_ok!(harness
        .mount(app.clone(), Part(1), "part1.txt")
        .settled()
        .await);
    assert_eq!(instance.flags().input, "42");

    let calls = app.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].0,
        Flags {
            part: Part(1),
            input: "42".to_string()
        }
    );

    let blocks = page.blocks();
    assert!(calls[0].1.same_node(&blocks[0].answer));
    assert_eq!(
        blocks[0].answer.content().as_deref(),
        Some("answer for part 1")
    );
}

#[tokio::test]
async fn test_failed_fetch_never_initializes() {
    let (page, inputs, harness) = setup();
    let app = Arc::new(Recorder::default());
    inputs
        .gate("part2.txt")
        .send(Err("connection reset".to_string()))
        .unwrap();

    let result = harness.mount(app.clone(), Part(2), "part2.txt").settled().await;

    assert!(matches!(result, Err(HarnessError::IoError(_))));
    assert!(app.parts().is_empty());
    assert_eq!(page.len(), 1);
    assert!(page.blocks()[0].answer.is_empty());
}

#[tokio::test]
async fn test_concurrent_mounts_initialize_in_resolution_order() {
    let (page, inputs, harness) = setup();
    let app = Arc::new(Recorder::default());
    let first = inputs.gate("PartOne.txt");
    let second = inputs.gate("PartTwo.txt");

    let part_one = harness.mount(app.clone(), Part(1), "PartOne.txt");
    let part_two = harness.mount(app.clone(), Part(2), "PartTwo.txt");

    second.send(Ok("b".to_string())).unwrap();
    tokio_test::assert_ok!(part_two.settled().await);
    assert_eq!(app.parts(), vec![2]);

    first.send(Ok("a".to_string())).unwrap();
    tokio_test::assert_ok!(part_one.settled().await);
    assert_eq!(app.parts(), vec![2, 1]);

    // 頁面順序依建立順序，而非完成順序
    let labels: Vec<String> = page.blocks().into_iter().map(|b| b.label).collect();
    assert_eq!(labels, vec!["(Solution 1)", "(Solution 2)"]);
    let blocks = page.blocks();
    assert!(!blocks[0].answer.same_node(&blocks[1].answer));
}

#[tokio::test]
async fn test_application_error_is_isolated_to_its_mount() {
    let (page, inputs, harness) = setup();
    let app = Arc::new(Recorder::default());
    inputs.gate("bad.txt").send(Ok("x".to_string())).unwrap();
    inputs.gate("good.txt").send(Ok("7".to_string())).unwrap();

    let bad = harness.mount(Arc::new(Rejects), Part(1), "bad.txt");
    let good = harness.mount(app.clone(), Part(2), "good.txt");

    assert!(matches!(
        bad.settled().await,
        Err(HarnessError::ApplicationError { .. })
    ));
    tokio_test::assert_ok!(good.settled().await);
    assert_eq!(app.parts(), vec![2]);
    assert!(page.blocks()[0].answer.is_empty());
}

#[tokio::test]
async fn test_detached_mount_still_renders() {
    let (page, inputs, harness) = setup();
    let app = Arc::new(Recorder::default());
    let gate = inputs.gate("part1.txt");

    harness.mount(app.clone(), Part(1), "part1.txt").detach();
    gate.send(Ok("42".to_string())).unwrap();

    let node = page.blocks()[0].answer.clone();
    tokio::time::timeout(Duration::from_secs(5), async {
        while node.is_empty() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();

    assert_eq!(app.parts(), vec![1]);
}

#[tokio::test]
async fn test_part_identifier_is_not_validated() {
    let (page, inputs, harness) = setup();
    let app = Arc::new(Recorder::default());
    inputs.gate("zero.txt").send(Ok(String::new())).unwrap();

    tokio_test::assert_ok!(harness.mount(app.clone(), Part(0), "zero.txt").settled().await);
    assert_eq!(page.blocks()[0].label, "(Solution 0)");
    assert_eq!(app.parts(), vec![0]);
}
