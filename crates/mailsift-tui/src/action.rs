/// User intents produced by `input::map_event` and consumed by `App::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    NavigateBack,
    DrillIn,

    MoveDown,
    MoveUp,

    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CycleRowsPerPage,

    /// Sort by table column (0-based).
    SortColumn(usize),

    StartSearch,
    /// A character typed in Search/TextInput/UrlEntry mode; `'\x08'` is the
    /// backspace sentinel.
    InputChar(char),
    /// Enter inside the URL editor.
    InputNewline,
    InputConfirm,
    InputCancel,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,

    ToggleSelect,
    ToggleSelectAllPage,

    SubmitUrls,
    CycleScanMode,
    CycleFilterMode,
    EditUrls,
    ClearResults,
    Export,
    CopyToClipboard,

    Tick,
    Resize(u16, u16),
    None,
}
