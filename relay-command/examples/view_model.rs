//! 一个编辑器工具栏的视图模型：保存、撤销、打开第 N 页。
//! 运行时可通过 `RUST_LOG=relay_command=trace` 查看命令内部日志。
use relay_command::{AnyCommand, Command, ParameterizedCommand, RelayCommand, SubscriptionId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Document {
    dirty: Cell<bool>,
    history: RefCell<Vec<String>>,
    page: Cell<u32>,
    pages: u32,
}

struct EditorViewModel {
    doc: Rc<Document>,
    save: Rc<Command>,
    undo: Rc<Command>,
    goto_page: Rc<ParameterizedCommand<u32>>,
}

impl EditorViewModel {
    fn new(pages: u32) -> Self {
        let doc = Rc::new(Document {
            pages,
            ..Default::default()
        });

        let save = {
            let (run, check) = (doc.clone(), doc.clone());
            Rc::new(Command::with_can_execute(
                move || {
                    tracing::info!("saving document");
                    run.dirty.set(false);
                },
                move || check.dirty.get(),
            ))
        };

        let undo = {
            let (run, check) = (doc.clone(), doc.clone());
            Rc::new(Command::with_can_execute(
                move || {
                    if let Some(edit) = run.history.borrow_mut().pop() {
                        tracing::info!(%edit, "undo");
                    }
                },
                move || !check.history.borrow().is_empty(),
            ))
        };

        let goto_page = {
            let (run, check) = (doc.clone(), doc.clone());
            Rc::new(ParameterizedCommand::with_can_execute(
                move |page: u32| run.page.set(page),
                move |page: &u32| (1..=check.pages).contains(page),
            ))
        };

        Self {
            doc,
            save,
            undo,
            goto_page,
        }
    }

    fn edit(&self, text: &str) {
        self.doc.history.borrow_mut().push(text.to_string());
        self.doc.dirty.set(true);
        self.save.raise_can_execute_changed();
        self.undo.raise_can_execute_changed();
    }
}

/// 模拟 UI 绑定层：一个只认识 `dyn AnyCommand` 的按钮
struct Button {
    label: &'static str,
    command: Rc<dyn AnyCommand>,
    enabled: Rc<Cell<bool>>,
    subscription: Option<SubscriptionId>,
}

impl Button {
    fn bind(label: &'static str, command: Rc<dyn AnyCommand>) -> Self {
        let enabled = Rc::new(Cell::new(command.can_execute_any(None).unwrap_or(false)));
        let (flag, source) = (enabled.clone(), Rc::downgrade(&command));
        let subscription = command.subscribe_any(Rc::new(move || {
            if let Some(source) = source.upgrade() {
                flag.set(source.can_execute_any(None).unwrap_or(false));
            }
        }));

        Self {
            label,
            command,
            enabled,
            subscription: Some(subscription),
        }
    }

    fn click(&self) {
        if !self.enabled.get() {
            tracing::warn!(button = self.label, "click ignored: disabled");
            return;
        }
        if let Err(e) = self.command.execute_any(None) {
            tracing::error!(button = self.label, error = %e, "command failed");
        }
    }
}

impl Drop for Button {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.command.unsubscribe_any(id);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let vm = EditorViewModel::new(12);
    let save_button = Button::bind("save", vm.save.clone());
    let undo_button = Button::bind("undo", vm.undo.clone());

    save_button.click();
    vm.edit("insert heading");
    tracing::info!(
        save = save_button.enabled.get(),
        undo = undo_button.enabled.get(),
        "after edit"
    );

    save_button.click();
    undo_button.click();
    vm.save.raise_can_execute_changed();
    vm.undo.raise_can_execute_changed();
    tracing::info!(
        save = save_button.enabled.get(),
        undo = undo_button.enabled.get(),
        "after save and undo"
    );

    // 页码来自文本框，类型转换由绑定层完成
    vm.goto_page.try_execute(7u64)?;
    tracing::info!(page = vm.doc.page.get(), "navigated");

    let erased: Rc<dyn AnyCommand> = vm.goto_page.clone();
    if let Err(e) = erased.execute_any(Some(&"7")) {
        tracing::warn!(error = %e, "rejected page parameter");
    }

    if !vm.goto_page.can_execute(&40) {
        tracing::info!(page = 40, "page out of range");
    }

    drop(save_button);
    drop(undo_button);
    Ok(())
}
