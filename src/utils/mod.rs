use anyhow::Result;
use mdbook::book::{Book, BookItem, Chapter};

/// Applies `func` to every chapter of the book, depth first.
pub fn map_chapter<F>(book: &mut Book, func: &mut F) -> Result<()>
where
    F: FnMut(&mut Chapter) -> Result<()>,
{
    fn visit<F>(items: &mut [BookItem], func: &mut F) -> Result<()>
    where
        F: FnMut(&mut Chapter) -> Result<()>,
    {
        for item in items {
            if let BookItem::Chapter(chapter) = item {
                func(chapter)?;
                visit(&mut chapter.sub_items, func)?;
            }
        }
        Ok(())
    }
    visit(&mut book.sections, func)
}
