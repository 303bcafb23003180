/// How a call to [`super::Readline::read`] ended.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Signal {
    Success,
    CtrlD,
}
